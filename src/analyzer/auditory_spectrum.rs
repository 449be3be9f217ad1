use crate::common::scaler::Scaler;
use core::f32::consts::LOG2_E;
use itertools::izip;
#[allow(unused_imports)]
use num_traits::real::Real;

/// Equal-loudness weighting followed by power-law loudness compression.
/// With `expand_log` set, the weighted value is exponentiated first to undo
/// an earlier log stage. Values are clamped at zero before the compression
/// so the output stays real and finite for any flag combination.
pub fn apply(bands: &mut [Scaler], eql_curve: &[Scaler], compression: Scaler, expand_log: bool) {
    for (value, weight) in izip!(bands.iter_mut(), eql_curve.iter()) {
        let mut weighted = *value * *weight;
        if expand_log {
            weighted = exp(weighted);
        }
        *value = weighted.max(0.0).powf(compression);
    }
}

/// Standalone inverse of the natural-log stage.
pub fn expand_log(bands: &mut [Scaler]) {
    for value in bands.iter_mut() {
        *value = exp(*value);
    }
}

// good enough for loudness expansion and much faster than the accurate exp()
fn exp(x: Scaler) -> Scaler {
    fast_math::exp2_raw(x * LOG2_E)
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn weights_and_compresses() {
        let mut bands = [8.0, 27.0];
        let eql_curve = [1.0, 1.0];
        apply(&mut bands, &eql_curve, 1.0 / 3.0, false);

        assert!((bands[0] - 2.0).abs() < 1e-3);
        assert!((bands[1] - 3.0).abs() < 1e-3);
    }

    #[test]
    fn loudness_curve_scales_the_bands() {
        let mut bands = [4.0, 4.0];
        let eql_curve = [0.25, 1.0];
        apply(&mut bands, &eql_curve, 1.0, false);

        assert!((bands[0] - 1.0).abs() < 1e-6);
        assert!((bands[1] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let mut bands = [-5.0, 0.0];
        let eql_curve = [1.0, 1.0];
        apply(&mut bands, &eql_curve, 1.0 / 3.0, false);

        assert_eq!(bands, [0.0, 0.0]);
    }

    #[test]
    fn expand_log_inverts_the_log_stage() {
        let original: [Scaler; 3] = [0.5, 2.0, 7.0];
        let mut bands = original;
        for value in bands.iter_mut() {
            *value = value.ln();
        }
        expand_log(&mut bands);

        // exp2_raw trades accuracy for speed, so the tolerance is loose
        for (round_trip, expected) in bands.iter().zip(original.iter()) {
            let relative = (round_trip - expected).abs() / expected;
            assert!(relative < 0.1, "{round_trip} vs {expected}");
        }
    }

    #[test]
    fn fused_expansion_runs_before_compression() {
        // weight 1, expand then cube root: exp(ln(8))^(1/3) ~ 2
        let mut bands = [8.0 as Scaler];
        let mut logged = [bands[0].ln()];
        let eql_curve = [1.0];
        apply(&mut logged, &eql_curve, 1.0 / 3.0, true);
        apply(&mut bands, &eql_curve, 1.0 / 3.0, false);

        let relative = (logged[0] - bands[0]).abs() / bands[0];
        assert!(relative < 0.1, "{} vs {}", logged[0], bands[0]);
    }
}
