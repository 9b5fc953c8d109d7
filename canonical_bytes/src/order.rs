//! Byte-order strategies.
//!
//! A strategy maps a host value to the value whose in-memory bytes are the
//! canonical little-endian encoding, and back. Both directions are the same
//! operation, since reversing twice is the identity.

use crate::Scalar;

/// Compile-time byte-order strategy.
pub trait ByteOrder {
    /// Whether scalars are byte-reversed on the way to and from disk.
    const REVERSES: bool;

    /// Host value to canonical value.
    #[inline]
    fn to_canonical<S: Scalar>(value: S) -> S {
        if Self::REVERSES { value.swap_bytes() } else { value }
    }

    /// Canonical value to host value.
    #[inline]
    fn from_canonical<S: Scalar>(value: S) -> S {
        if Self::REVERSES { value.swap_bytes() } else { value }
    }
}

/// Bytes go to disk exactly as they sit in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verbatim;

impl ByteOrder for Verbatim {
    const REVERSES: bool = false;
}

/// Bytes are reversed on the way to and from disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Swapped;

impl ByteOrder for Swapped {
    const REVERSES: bool = true;
}

/// Strategy for the compilation target.
#[cfg(all(target_endian = "big", feature = "canonical"))]
pub type HostOrder = Swapped;

/// Strategy for the compilation target.
#[cfg(not(all(target_endian = "big", feature = "canonical")))]
pub type HostOrder = Verbatim;
