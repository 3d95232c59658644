/// Splits a double word into `(lo, hi)`.
#[inline]
pub(crate) fn split(x: u128) -> (u64, u64) {
    (x as u64, (x >> 64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_halves() {
        let x = (0xdead_beef_u128 << 64) | 0x1234;
        assert_eq!(split(x), (0x1234, 0xdead_beef));
        assert_eq!(split(u128::MAX), (u64::MAX, u64::MAX));
    }
}
