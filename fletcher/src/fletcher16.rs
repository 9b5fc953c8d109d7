//! Byte-granularity Fletcher checksum.

use crate::Checksum;

const MODULUS: u16 = 255;

/// Fletcher-16: one byte at a time, both sums modulo 255.
///
/// Never groups bytes into words, so the result does not depend on how the
/// host would interpret multi-byte values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fletcher16 {
    sum1: u16,
    sum2: u16,
}

impl Fletcher16 {
    /// Zeroed state.
    pub const fn new() -> Self {
        Self { sum1: 0, sum2: 0 }
    }

    /// Current `(sum1, sum2)` pair.
    pub fn sums(&self) -> (u16, u16) {
        (self.sum1, self.sum2)
    }
}

impl Checksum for Fletcher16 {
    type Digest = u16;

    fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.sum1 = (self.sum1 + u16::from(b)) % MODULUS;
            self.sum2 = (self.sum2 + self.sum1) % MODULUS;
        }
    }

    #[inline]
    fn finalize(&self) -> u16 {
        (self.sum1 << 8) | self.sum2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(Fletcher16::checksum(&[]), 0);
    }

    #[test]
    fn reference_strings() {
        // sum1 occupies the high byte
        assert_eq!(Fletcher16::checksum(b"abcde"), 0xF0C8);
        assert_eq!(Fletcher16::checksum(b"abcdef"), 0x5720);
    }

    #[test]
    fn split_updates_match_one_shot() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let mut state = Fletcher16::new();
        for chunk in data.chunks(3) {
            state.update(chunk);
        }
        assert_eq!(state.finalize(), Fletcher16::checksum(data));
    }

    #[test]
    fn sums_stay_below_modulus() {
        let mut state = Fletcher16::new();
        state.update(&[0xFF; 1024]);
        let (s1, s2) = state.sums();
        assert!(s1 < MODULUS && s2 < MODULUS);
    }

    #[test]
    fn order_sensitive() {
        assert_ne!(Fletcher16::checksum(&[1, 2]), Fletcher16::checksum(&[2, 1]));
    }
}
