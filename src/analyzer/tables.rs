use crate::common::config::PlpConfig;
use crate::common::constants::{MAX_CEPSTRA, MAX_COS_TABLE, MAX_NUM_BANDS, MAX_TABLE_BUNDLES};
use crate::common::scaler::Scaler;
use core::f64::consts::PI;
use heapless::Vec;
#[allow(unused_imports)]
use num_traits::real::Real;

/// Derived tables for one frame geometry: the equal-loudness curve sampled
/// at the band centers, the cosine basis realizing the inverse DFT, and the
/// liftering weights. Immutable once built.
pub struct TableBundle {
    n_freq: usize,
    n_auto: usize,
    eql_curve: Vec<Scaler, MAX_NUM_BANDS>,
    cos_basis: Vec<Scaler, MAX_COS_TABLE>,
    lifter_weights: Vec<Scaler, MAX_CEPSTRA>,
}

impl TableBundle {
    fn build(config: &PlpConfig, n_freq: usize) -> Self {
        // band centers equally spaced on the Bark axis up to Nyquist
        let mut eql_curve: Vec<Scaler, MAX_NUM_BANDS> = Vec::new();
        let nyquist_bark = hz_to_bark(config.sample_rate as f64 * 0.5);
        for i in 0..n_freq {
            let center_bark = nyquist_bark * (i + 1) as f64 / (n_freq + 1) as f64;
            let center_hz = bark_to_hz(center_bark);
            let weight = if config.htk_compatible {
                equal_loudness_htk(center_hz)
            } else {
                equal_loudness(center_hz)
            };
            eql_curve.push(weight as Scaler).ok();
        }
        if config.htk_compatible && n_freq >= 2 {
            // HTK copies the edge channels from their neighbours
            eql_curve[0] = eql_curve[1];
            eql_curve[n_freq - 1] = eql_curve[n_freq - 2];
        }

        let mut cos_basis: Vec<Scaler, MAX_COS_TABLE> = Vec::new();
        for k in 0..config.n_auto {
            for n in 0..n_freq {
                let angle = PI * k as f64 * (n as f64 + 0.5) / n_freq as f64;
                cos_basis.push(angle.cos() as Scaler).ok();
            }
        }

        let mut lifter_weights: Vec<Scaler, MAX_CEPSTRA> = Vec::new();
        for m in 0..config.n_ceps {
            let weight = if config.cep_lifter == 0.0 {
                1.0
            } else {
                let lifter = config.cep_lifter as f64;
                1.0 + 0.5 * lifter * (PI * m as f64 / lifter).sin()
            };
            lifter_weights.push(weight as Scaler).ok();
        }

        Self {
            n_freq,
            n_auto: config.n_auto,
            eql_curve,
            cos_basis,
            lifter_weights,
        }
    }

    pub fn eql_curve(&self) -> &[Scaler] {
        &self.eql_curve
    }

    pub fn lifter_weights(&self) -> &[Scaler] {
        &self.lifter_weights
    }

    /// Cosine basis row realizing autocorrelation lag `k`.
    pub fn cos_row(&self, k: usize) -> &[Scaler] {
        debug_assert!(k < self.n_auto);
        &self.cos_basis[k * self.n_freq..(k + 1) * self.n_freq]
    }
}

/// Memoized table bundles keyed by frame width. Owned by a single stream,
/// which makes the build-once-per-key contract hold by ownership; a bundle
/// is synthesized on the first frame of its geometry and every later lookup
/// is a pure read.
pub struct TableCache {
    bundles: Vec<TableBundle, MAX_TABLE_BUNDLES>,
    builds: usize,
}

impl TableCache {
    pub fn new() -> Self {
        Self {
            bundles: Vec::new(),
            builds: 0,
        }
    }

    /// Returns the bundle for `frame_width`, synthesizing it on first use.
    /// The oldest resident bundle is evicted beyond capacity.
    pub fn ensure(&mut self, config: &PlpConfig, frame_width: usize) -> &TableBundle {
        if let Some(index) = self.bundles.iter().position(|b| b.n_freq == frame_width) {
            return &self.bundles[index];
        }

        if self.bundles.is_full() {
            self.bundles.swap_remove(0);
        }
        let bundle = TableBundle::build(config, frame_width);
        self.builds += 1;
        log::debug!(
            "synthesized plp tables for {} bands (build #{})",
            frame_width,
            self.builds
        );
        self.bundles.push(bundle).ok();
        &self.bundles[self.bundles.len() - 1]
    }

    /// Number of table synthesis events since construction.
    pub fn build_count(&self) -> usize {
        self.builds
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Bark scale after Schroeder: z = 6 * asinh(f / 600).
fn hz_to_bark(hz: f64) -> f64 {
    6.0 * (hz / 600.0).asinh()
}

fn bark_to_hz(bark: f64) -> f64 {
    600.0 * (bark / 6.0).sinh()
}

/// Classic equal-loudness weighting (Hermansky), omega = 2*pi*f.
fn equal_loudness(hz: f64) -> f64 {
    let w2 = (2.0 * PI * hz) * (2.0 * PI * hz);
    let w4 = w2 * w2;
    ((w2 + 56.8e6) * w4) / ((w2 + 6.3e6) * (w2 + 6.3e6) * (w2 + 0.38e9))
}

/// HTK variant of the equal-loudness weighting.
fn equal_loudness_htk(hz: f64) -> f64 {
    let fsq = hz * hz;
    let fsub = fsq / (fsq + 1.6e5);
    fsub * fsub * ((fsq + 1.44e6) / (fsq + 9.61e6))
}
