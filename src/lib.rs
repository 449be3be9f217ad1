//! PLP and RASTA-PLP cepstral coefficients from a critical band spectrum.
//!
//! The crate implements a single frame-by-frame processing stage: per frame
//! it takes `n_freq` critical-band powers and produces cepstral coefficients
//! via (optionally) log compression, RASTA temporal filtering, the auditory
//! loudness transform, inverse-DFT autocorrelation estimation,
//! Durbin-Levinson linear prediction and the LPC-to-cepstrum recursion with
//! liftering. Start at [`analyzer::plp_analyzer::PlpAnalyzer`].

#![cfg_attr(not(test), no_std)]

pub mod analyzer;
pub mod common;
