//! # fletcher
//!
//! Incremental two-accumulator checksums for streaming data.
//!
//! Both variants keep only two running sums and fold bytes in as they pass,
//! so a writer can checksum a payload while producing it without a second
//! pass over the data.
//!
//! ```rust
//! use fletcher::{Checksum, Fletcher64};
//!
//! let mut sum = Fletcher64::new();
//! sum.update(&[1, 2, 3, 4]);
//! sum.update(&[5]);
//! assert_eq!(sum.finalize(), 0x0403_0106_0806_0307);
//! ```

use core::fmt;

mod fletcher16;
mod fletcher64;

pub use fletcher16::Fletcher16;
pub use fletcher64::Fletcher64;

/// A rolling checksum updated in lock-step with a byte stream.
pub trait Checksum: Default {
    /// Combined value produced by [`Checksum::finalize`].
    type Digest: Copy + Eq + Into<u64> + fmt::Debug;

    /// Folds `bytes` into the running state.
    fn update(&mut self, bytes: &[u8]);

    /// Combines the two accumulators into a single value.
    ///
    /// Does not reset the state; further updates continue from where the
    /// stream left off.
    fn finalize(&self) -> Self::Digest;

    /// One-shot checksum over a complete buffer.
    fn checksum(bytes: &[u8]) -> Self::Digest {
        let mut state = Self::default();
        state.update(bytes);
        state.finalize()
    }
}
