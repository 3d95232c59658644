//! Modular inversion by binary extended GCD, using only halving and
//! subtraction on single words.

use crate::fp::MODULUS;

/// Halves `x` modulo the field order. An odd `x` is made even by adding
/// `MODULUS` first; the carry out of that addition becomes the new top bit.
#[inline(always)]
fn half_mod(x: u64) -> u64 {
    if x & 1 == 0 {
        x >> 1
    } else {
        let (sum, carry) = x.overflowing_add(MODULUS);
        (sum >> 1) | ((carry as u64) << 63)
    }
}

/// `x - y` modulo the field order, both canonical.
#[inline(always)]
fn sub_mod(x: u64, y: u64) -> u64 {
    let (diff, borrow) = x.overflowing_sub(y);
    if borrow {
        diff.wrapping_add(MODULUS)
    } else {
        diff
    }
}

/// Returns `x^-1 mod MODULUS` for a canonical word, or `0` when `x == 0`.
///
/// Tracks `(u, r)` and `(v, s)` with `r * x = u` and `s * x = v` modulo the
/// field order, starting from `u = MODULUS, r = 0` and `v = x, s = 1`. Each
/// round strips the factors of two from `u` and `v` (halving the paired
/// coefficient in the field) and subtracts the smaller from the larger,
/// until one side reaches 1.
pub(crate) fn inverse_u64(x: u64) -> u64 {
    if x == 0 {
        return 0;
    }
    debug_assert!(x < MODULUS);

    let (mut u, mut r) = (MODULUS, 0u64);
    let (mut v, mut s) = (x, 1u64);

    while u != 1 && v != 1 {
        while v & 1 == 0 {
            v >>= 1;
            s = half_mod(s);
        }
        while u & 1 == 0 {
            u >>= 1;
            r = half_mod(r);
        }
        if v >= u {
            v -= u;
            s = sub_mod(s, r);
        } else {
            u -= v;
            r = sub_mod(r, s);
        }
    }

    if u == 1 {
        r
    } else {
        s
    }
}
