/// Floating point type used throughout the crate. All per-band arithmetic is
/// done in this precision; switch to f64 here if the target can afford it.
pub type Scaler = f32;
