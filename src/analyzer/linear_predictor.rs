use crate::common::constants::MAX_AUTOCORR;
use crate::common::scaler::Scaler;
#[allow(unused_imports)]
use num_traits::real::Real;

/// Reflection coefficients whose magnitude reaches 1 are pulled back to this
/// bound and the recursion continues with a stable filter.
pub const REFLECTION_LIMIT: Scaler = 0.9999;

/// Durbin-Levinson recursion over acf[0..=order], order = lpc.len() - 1.
///
/// acf[0] is floored to `melfloor` so near-zero or negative energy from
/// numerical noise cannot derail the division. Writes the prediction
/// coefficients with lpc[0] fixed at 1 and returns the residual prediction
/// error.
pub fn levinson(acf: &[Scaler], melfloor: Scaler, lpc: &mut [Scaler]) -> Scaler {
    let order = lpc.len() - 1;
    assert!(acf.len() > order);
    debug_assert!(order < MAX_AUTOCORR);

    let mut a_memory = [[0.0 as Scaler; MAX_AUTOCORR]; 2];
    let (a, a_last) = a_memory.split_at_mut(1);
    let mut a = &mut a[0];
    let mut a_last = &mut a_last[0];

    let mut error = acf[0].max(melfloor);
    a[0] = 1.0;

    for k in 1..=order {
        core::mem::swap(&mut a_last, &mut a);

        // reflection coefficient from the prediction error and the next lag
        let mut acc = acf[k];
        for n in 1..k {
            acc -= a_last[n] * acf[k - n];
        }
        let mut reflection = 0.0;
        if error != 0.0 {
            reflection = acc / error;
        }
        if reflection.abs() >= 1.0 {
            log::warn!("unstable reflection coefficient {} at order {}, clamping", reflection, k);
            reflection = if reflection > 0.0 {
                REFLECTION_LIMIT
            } else {
                -REFLECTION_LIMIT
            };
        }

        // order-k coefficient update and error shrinkage
        a[0] = 1.0;
        for n in 1..k {
            a[n] = a_last[n] - reflection * a_last[k - n];
        }
        a[k] = reflection;
        error *= 1.0 - reflection * reflection;
    }

    lpc[..=order].copy_from_slice(&a[..=order]);
    error
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn first_order_process_is_recovered_exactly() {
        // AR(1) with pole 0.5: acf[k] = 0.5^k
        let acf = [1.0, 0.5, 0.25];
        let mut lpc = [0.0; 3];
        let error = levinson(&acf, 1e-5, &mut lpc);

        assert_eq!(lpc, [1.0, 0.5, 0.0]);
        assert_eq!(error, 0.75);
    }

    #[test]
    fn zero_energy_yields_a_flat_predictor() {
        let acf = [0.0; 4];
        let mut lpc = [0.0; 4];
        let error = levinson(&acf, 1e-5, &mut lpc);

        assert_eq!(lpc[0], 1.0);
        assert!(lpc[1..].iter().all(|a| *a == 0.0));
        assert_eq!(error, 1e-5); // the melfloor survives as residual energy
    }

    #[test]
    fn unstable_reflection_is_clamped_not_fatal() {
        // acf[1] > acf[0] forces a reflection coefficient beyond 1
        let acf = [1.0, 1.2];
        let mut lpc = [0.0; 2];
        let error = levinson(&acf, 1e-5, &mut lpc);

        assert_eq!(lpc, [1.0, REFLECTION_LIMIT]);
        assert!(error > 0.0 && error.is_finite());

        // and the recursion keeps going at higher orders
        let acf = [1.0, 1.2, 0.1];
        let mut lpc = [0.0; 3];
        let error = levinson(&acf, 1e-5, &mut lpc);
        assert!(lpc.iter().all(|a| a.is_finite()));
        assert!(error > 0.0 && error.is_finite());
    }

    #[test]
    fn residual_error_shrinks_with_order() {
        let acf = [2.0, 1.2, 0.9, 0.5, 0.3];
        let mut lpc_low = [0.0; 2];
        let mut lpc_high = [0.0; 5];
        let error_low = levinson(&acf, 1e-5, &mut lpc_low);
        let error_high = levinson(&acf, 1e-5, &mut lpc_high);

        assert!(error_high <= error_low);
        assert!(error_high > 0.0);
    }

    #[test]
    fn lower_orders_are_a_prefix_computation() {
        // running at order 1 matches the first step of a longer recursion
        let acf = [2.0, 1.2, 0.9];
        let mut lpc = [0.0; 2];
        levinson(&acf, 1e-5, &mut lpc);

        assert_eq!(lpc[0], 1.0);
        assert_eq!(lpc[1], 0.6); // acf[1] / acf[0]
    }
}
