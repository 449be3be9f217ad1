use super::fir_history::FirHistory;
use crate::common::config::{PlpConfig, RastaMode};
use crate::common::constants::RASTA_FIR_LEN;
use crate::common::scaler::Scaler;
use core::f64::consts::PI;
#[allow(unused_imports)]
use num_traits::real::Real;

// Classic RASTA bandpass y[n] = sum_j fir[j]*x[n-j] + pole*y[n-1] with the
// ramp numerator 0.1*(2 + z^-1 - z^-3 - 2*z^-4). The pole realizes the
// configured lower cutoff; the ramp kernel fixes the upper band edge.
const FIR_GAIN: Scaler = 0.1;
const FIR_RAMP: [Scaler; RASTA_FIR_LEN] = [2.0, 1.0, 0.0, -1.0, -2.0];

/// Per-band temporal filter with persistent cyclic FIR history and IIR
/// state. Exactly one state advance happens per processed frame; frame n+1
/// depends on the history written by frame n.
pub struct RastaFilter<'a> {
    // constant
    mode: RastaMode,
    n_bands: usize,
    fir_coef: [Scaler; RASTA_FIR_LEN],
    iir_pole: Scaler,

    // state
    iir_state: &'a mut [Scaler],
    history: FirHistory<'a>,
}

impl<'a> RastaFilter<'a> {
    pub fn new(config: &PlpConfig, scaler_buf: &'a mut [Scaler]) -> (Self, &'a mut [Scaler]) {
        let n_bands = if config.rasta == RastaMode::Off {
            0
        } else {
            config.n_freq
        };
        let (iir_state, scaler_buf) = scaler_buf.split_at_mut(n_bands);
        iir_state.fill(0.0);
        let (history, scaler_buf) = FirHistory::new(n_bands, scaler_buf);

        let mut fir_coef = [0.0; RASTA_FIR_LEN];
        for (coef, ramp) in fir_coef.iter_mut().zip(FIR_RAMP.iter()) {
            *coef = FIR_GAIN * *ramp;
        }
        let lower_norm = config.rasta_lower_cutoff as f64 / config.frame_rate as f64;
        let iir_pole = (-2.0 * PI * lower_norm).exp() as Scaler;

        (
            Self {
                mode: config.rasta,
                n_bands,
                fir_coef,
                iir_pole,
                iir_state,
                history,
            },
            scaler_buf,
        )
    }

    pub const fn calc_working_buffer_length(config: &PlpConfig) -> usize {
        match config.rasta {
            RastaMode::Off => 0,
            _ => config.n_freq * (RASTA_FIR_LEN + 1),
        }
    }

    /// Filters one frame in place, advancing the per-band state by one step.
    /// Until the history is full the bandpass output is withheld: the frame
    /// is zeroed or passed through unfiltered depending on the mode. With
    /// RASTA off this is the identity and touches no state.
    pub fn run(&mut self, bands: &mut [Scaler]) {
        if self.mode == RastaMode::Off {
            return;
        }
        assert_eq!(bands.len(), self.n_bands);

        self.history.push(bands);
        let warmed_up = self.history.is_full();

        for (band, value) in bands.iter_mut().enumerate() {
            let mut fir_out = 0.0;
            for (age, coef) in self.fir_coef.iter().enumerate() {
                fir_out += *coef * self.history.sample(band, age);
            }
            let filtered = fir_out + self.iir_pole * self.iir_state[band];
            self.iir_state[band] = filtered;

            if warmed_up {
                *value = filtered;
            } else if self.mode == RastaMode::MuteWarmup {
                *value = 0.0;
            }
            // PassthroughWarmup leaves the unfiltered value in place
        }
    }

    /// Restores stream-start state: empty history, zeroed accumulators.
    pub fn reset(&mut self) {
        self.history.reset();
        self.iir_state.fill(0.0);
    }
}
