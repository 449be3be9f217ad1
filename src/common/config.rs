use crate::common::constants::{MAX_AUTOCORR, MAX_LP_ORDER, MAX_NUM_BANDS};
use crate::common::scaler::Scaler;

/// Behavior of the RASTA temporal filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RastaMode {
    /// Stage disabled, the band spectrum passes through unchanged.
    Off,
    /// Bandpass output is muted until the FIR history is full.
    MuteWarmup,
    /// Input is passed through unfiltered until the FIR history is full.
    PassthroughWarmup,
}

#[derive(Clone, Copy)]
pub struct PlpConfig {
    /// Number of critical bands in an input frame (e.g. 26)
    pub n_freq: usize,

    /// Number of auditory-scale points the derived tables are sampled at.
    /// Must equal n_freq.
    pub n_scale: usize,

    /// Number of autocorrelation lags produced by the inverse DFT (e.g. 13)
    pub n_auto: usize,

    /// Linear prediction order (e.g. 12)
    pub lp_order: usize,

    /// Number of cepstral coefficients computed (e.g. 13)
    pub n_ceps: usize,

    /// First cepstral coefficient emitted (e.g. 1)
    pub first_cc: usize,

    /// Last cepstral coefficient emitted, inclusive (e.g. 12)
    pub last_cc: usize,

    /// Liftering parameter L; 0 disables liftering
    pub cep_lifter: Scaler,

    /// Floor applied to band powers before the log and to acf[0] (e.g. 1e-5)
    pub melfloor: Scaler,

    /// Loudness compression exponent (classic PLP uses 1/3)
    pub compression: Scaler,

    /// Lower edge of the RASTA bandpass in Hz (e.g. 0.9)
    pub rasta_lower_cutoff: Scaler,

    /// Upper edge of the RASTA bandpass in Hz (e.g. 29.0)
    pub rasta_upper_cutoff: Scaler,

    /// Frame rate in frames per second; interprets the RASTA cutoffs (e.g. 100.0)
    pub frame_rate: Scaler,

    /// Audio sample rate in Hz; band center frequencies for the
    /// equal-loudness curve are placed on the Bark axis up to fs/2
    pub sample_rate: usize,

    /// Take the natural logarithm of the band powers
    pub do_log: bool,

    /// RASTA temporal filtering
    pub rasta: RastaMode,

    /// Equal-loudness weighting and loudness compression
    pub do_aud: bool,

    /// Undo an earlier log stage by exponentiation
    pub do_inv_log: bool,

    /// Inverse DFT of the band spectrum into autocorrelation lags
    pub do_idft: bool,

    /// Durbin-Levinson linear prediction
    pub do_lp: bool,

    /// LPC-to-cepstrum conversion and liftering
    pub do_lp_to_ceps: bool,

    /// Use the HTK equal-loudness curve variant with duplicated edge entries
    pub htk_compatible: bool,
}

/// Configuration problem detected at stream setup. All variants are fatal to
/// stream startup; none can occur per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    NonPositiveLpOrder,
    LpOrderTooLarge { lp_order: usize },
    BandCountOutOfRange { n_freq: usize },
    ScaleWidthMismatch { n_scale: usize, n_freq: usize },
    AutocorrelationOrderOutOfRange { n_auto: usize, lp_order: usize },
    CepstraCountOutOfRange { n_ceps: usize, lp_order: usize },
    CoefficientRangeInvalid { first_cc: usize, last_cc: usize, n_ceps: usize },
    InvalidMelfloor { melfloor: Scaler },
    InvalidCompression { compression: Scaler },
    InvalidSampleRate,
    InvalidRastaCutoffs { lower: Scaler, upper: Scaler, frame_rate: Scaler },
    BandsTooFewForAutocorrelation { n_freq: usize, n_auto: usize },
}

impl PlpConfig {
    /// Classic PLP: auditory spectrum, inverse DFT, linear prediction and
    /// cepstral conversion, operating directly on linear band powers.
    pub fn plp(n_freq: usize, lp_order: usize, n_ceps: usize) -> Self {
        Self {
            n_freq,
            n_scale: n_freq,
            n_auto: lp_order + 1,
            lp_order,
            n_ceps,
            first_cc: 1,
            last_cc: if n_ceps > 0 { n_ceps - 1 } else { 0 },
            cep_lifter: 22.0,
            melfloor: 1e-5,
            compression: 1.0 / 3.0,
            rasta_lower_cutoff: 0.9,
            rasta_upper_cutoff: 29.0,
            frame_rate: 100.0,
            sample_rate: 16000,
            do_log: false,
            rasta: RastaMode::Off,
            do_aud: true,
            do_inv_log: false,
            do_idft: true,
            do_lp: true,
            do_lp_to_ceps: true,
            htk_compatible: false,
        }
    }

    /// RASTA-PLP: the classic pipeline with log compression and temporal
    /// filtering in the log domain, undone by exponentiation before the
    /// auditory compression.
    pub fn rasta_plp(n_freq: usize, lp_order: usize, n_ceps: usize) -> Self {
        Self {
            do_log: true,
            rasta: RastaMode::MuteWarmup,
            do_inv_log: true,
            ..Self::plp(n_freq, lp_order, n_ceps)
        }
    }

    /// Checks every setup-time invariant. Frame processing assumes a
    /// validated configuration and never re-checks these.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lp_order == 0 {
            return Err(ConfigError::NonPositiveLpOrder);
        }
        if self.lp_order > MAX_LP_ORDER {
            return Err(ConfigError::LpOrderTooLarge { lp_order: self.lp_order });
        }
        if self.n_freq == 0 || self.n_freq > MAX_NUM_BANDS {
            return Err(ConfigError::BandCountOutOfRange { n_freq: self.n_freq });
        }
        if self.n_scale != self.n_freq {
            return Err(ConfigError::ScaleWidthMismatch {
                n_scale: self.n_scale,
                n_freq: self.n_freq,
            });
        }
        if self.n_auto < self.lp_order + 1 || self.n_auto > MAX_AUTOCORR {
            return Err(ConfigError::AutocorrelationOrderOutOfRange {
                n_auto: self.n_auto,
                lp_order: self.lp_order,
            });
        }
        if self.n_ceps == 0 || self.n_ceps > self.lp_order + 1 {
            return Err(ConfigError::CepstraCountOutOfRange {
                n_ceps: self.n_ceps,
                lp_order: self.lp_order,
            });
        }
        if self.first_cc > self.last_cc || self.last_cc >= self.n_ceps {
            return Err(ConfigError::CoefficientRangeInvalid {
                first_cc: self.first_cc,
                last_cc: self.last_cc,
                n_ceps: self.n_ceps,
            });
        }
        if !(self.melfloor > 0.0) {
            return Err(ConfigError::InvalidMelfloor { melfloor: self.melfloor });
        }
        if !(self.compression > 0.0 && self.compression <= 1.0) {
            return Err(ConfigError::InvalidCompression {
                compression: self.compression,
            });
        }
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate);
        }
        if self.rasta != RastaMode::Off {
            let nyquist = self.frame_rate * 0.5;
            if !(self.frame_rate > 0.0
                && self.rasta_lower_cutoff > 0.0
                && self.rasta_lower_cutoff < self.rasta_upper_cutoff
                && self.rasta_upper_cutoff < nyquist)
            {
                return Err(ConfigError::InvalidRastaCutoffs {
                    lower: self.rasta_lower_cutoff,
                    upper: self.rasta_upper_cutoff,
                    frame_rate: self.frame_rate,
                });
            }
        }
        if !self.do_idft && self.do_lp && self.n_freq < self.n_auto {
            // the band vector itself is consumed as autocorrelation input
            return Err(ConfigError::BandsTooFewForAutocorrelation {
                n_freq: self.n_freq,
                n_auto: self.n_auto,
            });
        }
        Ok(())
    }

    /// Number of coefficients emitted per frame.
    pub const fn output_len(&self) -> usize {
        self.last_cc - self.first_cc + 1
    }
}
