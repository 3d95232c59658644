use crate::fp::Goldilocks;
use ff::Field;
use tracing::instrument;

/// Inverts every element of `x` with a single field inversion
/// (Montgomery's trick).
///
/// Zero entries come back as zero, the same sentinel as
/// [`Goldilocks::inverse`]; they are skipped in the running product so they
/// do not poison the other entries.
#[instrument(level = "debug", skip_all, fields(len = x.len()))]
#[must_use]
pub fn batch_inverse(x: &[Goldilocks]) -> Vec<Goldilocks> {
    let n = x.len();
    let mut result = vec![Goldilocks::ZERO; n];
    if n == 0 {
        return result;
    }

    // result[i] = product of the nonzero x[j] for j < i
    let mut acc = Goldilocks::ONE;
    for (r, xi) in result.iter_mut().zip(x) {
        *r = acc;
        if !xi.is_zero_vartime() {
            acc *= xi;
        }
    }

    let mut inv = acc.inverse();
    for (r, xi) in result.iter_mut().zip(x).rev() {
        if xi.is_zero_vartime() {
            *r = Goldilocks::ZERO;
        } else {
            *r *= inv;
            inv *= xi;
        }
    }
    result
}
