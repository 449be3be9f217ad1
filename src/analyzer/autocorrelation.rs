use super::tables::TableBundle;
use crate::common::scaler::Scaler;
use itertools::izip;

/// Inverse DFT of the band spectrum into lag-domain autocorrelation
/// coefficients. The spectrum is real and even-symmetric, so the transform
/// reduces to cosine-weighted sums over the cached basis:
/// acf[k] = sum_n spectrum[n] * cos(pi*k*(n+0.5)/N).
pub fn estimate(spectrum: &[Scaler], tables: &TableBundle, acf: &mut [Scaler]) {
    for (k, lag) in acf.iter_mut().enumerate() {
        let mut total = 0.0;
        for (value, basis) in izip!(spectrum.iter(), tables.cos_row(k).iter()) {
            total += *value * *basis;
        }
        *lag = total;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::super::tables::TableCache;
    use super::*;
    use crate::common::config::PlpConfig;

    #[test]
    fn constant_spectrum_concentrates_in_lag_zero() {
        let config = PlpConfig::plp(4, 2, 3);
        let mut cache = TableCache::new();
        let tables = cache.ensure(&config, 4);

        let spectrum = [1.0, 1.0, 1.0, 1.0];
        let mut acf = [0.0; 3];
        estimate(&spectrum, tables, &mut acf);

        assert_eq!(acf[0], 4.0);
        assert!(acf[1].abs() < 1e-6, "acf[1] = {}", acf[1]);
        assert!(acf[2].abs() < 1e-6, "acf[2] = {}", acf[2]);
    }

    #[test]
    fn impulse_spectrum_follows_the_basis() {
        let config = PlpConfig::plp(4, 2, 3);
        let mut cache = TableCache::new();
        let tables = cache.ensure(&config, 4);

        let spectrum = [1.0, 0.0, 0.0, 0.0];
        let mut acf = [0.0; 3];
        estimate(&spectrum, tables, &mut acf);

        // acf[k] = cos(pi*k*0.5/4)
        assert_eq!(acf[0], 1.0);
        assert!((acf[1] - (core::f32::consts::PI / 8.0).cos()).abs() < 1e-6);
        assert!((acf[2] - (core::f32::consts::PI / 4.0).cos()).abs() < 1e-6);
    }

    #[test]
    fn is_deterministic() {
        let config = PlpConfig::plp(8, 4, 5);
        let mut cache = TableCache::new();
        let tables = cache.ensure(&config, 8);

        let spectrum = [0.3, 1.7, 2.2, 0.1, 0.9, 4.5, 3.2, 0.6];
        let mut first = [0.0; 5];
        let mut second = [0.0; 5];
        estimate(&spectrum, tables, &mut first);
        estimate(&spectrum, tables, &mut second);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
