// capacity bounds used to size heapless storage and scratch buffers

/// Max number of critical bands in an input frame.
pub const MAX_NUM_BANDS: usize = 64;

/// Max linear prediction order.
pub const MAX_LP_ORDER: usize = 32;

/// Max autocorrelation (IDFT) order.
pub const MAX_AUTOCORR: usize = MAX_LP_ORDER + 1;

/// Max number of cepstral coefficients.
pub const MAX_CEPSTRA: usize = MAX_LP_ORDER + 1;

/// Taps in the RASTA FIR stage (and depth of its cyclic history).
pub const RASTA_FIR_LEN: usize = 5;

/// Table bundles a cache retains (one active geometry plus one spare).
pub const MAX_TABLE_BUNDLES: usize = 2;

/// Backing capacity for a cosine basis of MAX_AUTOCORR x MAX_NUM_BANDS.
pub const MAX_COS_TABLE: usize = MAX_AUTOCORR * MAX_NUM_BANDS;
