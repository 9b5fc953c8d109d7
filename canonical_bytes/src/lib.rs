//! # canonical_bytes
//!
//! Fixed-width scalars and the byte-order strategy used to put them on disk.
//!
//! Every multi-byte scalar is stored little-endian. [`HostOrder`] is chosen at
//! compile time: a no-op on little-endian targets, a byte reversal on
//! big-endian ones. A writer normalizes with [`ByteOrder::to_canonical`] and
//! views the result through [`bytemuck::bytes_of`].
//!
//! ```rust
//! use canonical_bytes::{ByteOrder, HostOrder};
//!
//! let canonical = HostOrder::to_canonical(0x0A0B_0C0Du32);
//! assert_eq!(bytemuck::bytes_of(&canonical), &[0x0D, 0x0C, 0x0B, 0x0A]);
//! ```

pub mod order;
pub mod scalar;

pub use order::{ByteOrder, HostOrder, Swapped, Verbatim};
pub use scalar::Scalar;

// Re-export bytemuck so downstream scalar newtypes can derive Pod
pub use bytemuck;
