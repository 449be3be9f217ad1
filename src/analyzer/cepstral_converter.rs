use crate::common::scaler::Scaler;
#[allow(unused_imports)]
use num_traits::real::Real;

/// LPC-to-cepstrum recursion.
///
/// ceps[0] carries the log residual energy and for m >= 1
/// ceps[m] = a[m] + (1/m) * sum_{k=1}^{m-1} k * ceps[k] * a[m-k],
/// where a are the prediction coefficients with a[0] = 1. The configuration
/// invariant n_ceps <= lp_order + 1 keeps every a[m] in range.
pub fn lpc_to_cepstra(lpc: &[Scaler], residual_energy: Scaler, ceps: &mut [Scaler]) {
    assert!(ceps.len() <= lpc.len());

    ceps[0] = residual_energy.max(1e-30).ln();
    for m in 1..ceps.len() {
        let mut acc = 0.0;
        for k in 1..m {
            acc += k as Scaler * ceps[k] * lpc[m - k];
        }
        ceps[m] = lpc[m] + acc / m as Scaler;
    }
}

/// Multiplies each retained cepstral coefficient by its cached liftering
/// weight.
pub fn apply_liftering(ceps: &mut [Scaler], weights: &[Scaler]) {
    for (value, weight) in ceps.iter_mut().zip(weights.iter()) {
        *value *= *weight;
    }
}
