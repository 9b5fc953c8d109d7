//! Word-granularity Fletcher checksum with one-padded tail words.

use crate::Checksum;

const MASK: u64 = 0xFFFF_FFFF;
const WORD: usize = 4;

/// Fletcher-64 over little-endian 32-bit words.
///
/// Both accumulators are masked to 32 bits after every addition. When an
/// [`update`](Checksum::update) call ends with `r` bytes (`0 < r < 4`) the
/// missing high-order bytes of that last word are filled with `0xFF` before
/// it is folded in. The padding is applied per call; the state carries no
/// leftover bytes between calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fletcher64 {
    sum1: u64,
    sum2: u64,
}

impl Fletcher64 {
    /// Zeroed state.
    pub const fn new() -> Self {
        Self { sum1: 0, sum2: 0 }
    }

    /// Current `(sum1, sum2)` pair.
    pub fn sums(&self) -> (u64, u64) {
        (self.sum1, self.sum2)
    }

    #[inline]
    fn fold(&mut self, word: u32) {
        self.sum1 = (self.sum1 + u64::from(word)) & MASK;
        self.sum2 = (self.sum2 + self.sum1) & MASK;
    }
}

impl Checksum for Fletcher64 {
    type Digest = u64;

    fn update(&mut self, bytes: &[u8]) {
        let mut words = bytes.chunks_exact(WORD);
        for w in &mut words {
            self.fold(u32::from_le_bytes([w[0], w[1], w[2], w[3]]));
        }

        let rest = words.remainder();
        if !rest.is_empty() {
            let mut tail = [0xFF; WORD];
            tail[..rest.len()].copy_from_slice(rest);
            self.fold(u32::from_le_bytes(tail));
        }
    }

    #[inline]
    fn finalize(&self) -> u64 {
        (self.sum1 << 32) | self.sum2
    }
}
