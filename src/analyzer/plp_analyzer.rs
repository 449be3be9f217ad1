use super::{
    auditory_spectrum, autocorrelation, cepstral_converter, linear_predictor, rasta_filter::RastaFilter,
    tables::TableCache,
};
use crate::common::{
    config::{ConfigError, PlpConfig},
    scaler::Scaler,
};
#[allow(unused_imports)]
use num_traits::real::Real;

/// Main entry point of library - Start here

#[derive(Debug, PartialEq)]
pub enum PlpError {
    InputWidthMismatch { expected: usize, actual: usize },
    OutputWidthMismatch { expected: usize, actual: usize },
}

/// Per-stream pipeline: validates the configuration once, owns the table
/// cache, the RASTA state and every scratch buffer, and converts one frame
/// of critical-band powers into cepstral coefficients per call.
pub struct PlpAnalyzer<'a> {
    // constant
    config: PlpConfig,

    // state
    tables: TableCache,
    rasta: RastaFilter<'a>,
    bands: &'a mut [Scaler],
    acf: &'a mut [Scaler],
    lpc: &'a mut [Scaler],
    ceps: &'a mut [Scaler],
    frame_index: usize,
}

impl<'a> PlpAnalyzer<'a> {
    /// Validates the configuration and carves all per-stream scratch slices
    /// out of `scaler_buf`, returning the unused remainder. The buffer must
    /// hold at least `calc_working_buffer_length(&config)` entries.
    pub fn new(
        config: PlpConfig,
        scaler_buf: &'a mut [Scaler],
    ) -> Result<(Self, &'a mut [Scaler]), ConfigError> {
        config.validate()?;

        let (rasta, scaler_buf) = RastaFilter::new(&config, scaler_buf);
        let (bands, scaler_buf) = scaler_buf.split_at_mut(config.n_freq);
        let (acf, scaler_buf) = scaler_buf.split_at_mut(config.n_auto);
        let (lpc, scaler_buf) = scaler_buf.split_at_mut(config.lp_order + 1);
        let (ceps, scaler_buf) = scaler_buf.split_at_mut(config.n_ceps);

        Ok((
            Self {
                config,
                tables: TableCache::new(),
                rasta,
                bands,
                acf,
                lpc,
                ceps,
                frame_index: 0,
            },
            scaler_buf,
        ))
    }

    pub const fn calc_working_buffer_length(config: &PlpConfig) -> usize {
        RastaFilter::calc_working_buffer_length(config)
            + config.n_freq
            + config.n_auto
            + (config.lp_order + 1)
            + config.n_ceps
    }

    /// Number of coefficients written per frame.
    pub const fn output_len(&self) -> usize {
        self.config.output_len()
    }

    /// Frames processed since construction or the last reset.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Number of table-bundle synthesis events on this stream.
    pub fn table_build_count(&self) -> usize {
        self.tables.build_count()
    }

    /// Runs the enabled stages over one frame of band powers, in fixed
    /// order: log, RASTA, auditory transform, inverse log, inverse DFT,
    /// linear prediction, cepstral conversion with liftering. A disabled
    /// stage passes its input through unchanged. The RASTA state advances
    /// exactly once per call; nothing else persists across frames.
    pub fn process_frame(&mut self, bands_in: &[Scaler], ceps_out: &mut [Scaler]) -> Result<(), PlpError> {
        if bands_in.len() != self.config.n_freq {
            return Err(PlpError::InputWidthMismatch {
                expected: self.config.n_freq,
                actual: bands_in.len(),
            });
        }
        if ceps_out.len() != self.config.output_len() {
            return Err(PlpError::OutputWidthMismatch {
                expected: self.config.output_len(),
                actual: ceps_out.len(),
            });
        }

        self.frame_index += 1;
        let config = &self.config;
        let tables = self.tables.ensure(config, bands_in.len());
        self.bands.copy_from_slice(bands_in);

        // natural log of the band powers, floored to keep it finite
        if config.do_log {
            for value in self.bands.iter_mut() {
                *value = value.max(config.melfloor).ln();
            }
        }

        // temporal filtering (advances the per-band state by one frame)
        self.rasta.run(self.bands);

        // auditory spectrum: loudness weighting and compression; the
        // inverse-log expansion runs fused ahead of the compression, or as
        // a standalone stage when the auditory transform is disabled
        if config.do_aud {
            auditory_spectrum::apply(self.bands, tables.eql_curve(), config.compression, config.do_inv_log);
        } else if config.do_inv_log {
            auditory_spectrum::expand_log(self.bands);
        }

        // inverse DFT into autocorrelation lags; with the IDFT bypassed the
        // band vector itself is consumed as autocorrelation input
        if config.do_idft {
            autocorrelation::estimate(self.bands, tables, self.acf);
        } else {
            self.acf.copy_from_slice(&self.bands[..config.n_auto]);
        }

        // linear prediction on the floored autocorrelation energy
        let mut residual = 0.0;
        if config.do_lp {
            self.acf[0] = self.acf[0].max(config.melfloor);
            residual = linear_predictor::levinson(self.acf, config.melfloor, self.lpc);
        }

        // cepstral conversion and liftering
        if config.do_lp_to_ceps {
            cepstral_converter::lpc_to_cepstra(self.lpc, residual, self.ceps);
            cepstral_converter::apply_liftering(self.ceps, tables.lifter_weights());
        }

        // emit the configured coefficient window of the last produced vector
        let source: &[Scaler] = if config.do_lp_to_ceps {
            self.ceps
        } else if config.do_lp {
            self.lpc
        } else if config.do_idft {
            self.acf
        } else {
            self.bands
        };
        ceps_out.copy_from_slice(&source[config.first_cc..=config.last_cc]);
        Ok(())
    }

    /// Restarts the stream: the temporal-filter state and the frame counter
    /// return to stream-start values. Cached tables are retained.
    pub fn reset(&mut self) {
        self.rasta.reset();
        self.frame_index = 0;
    }
}
