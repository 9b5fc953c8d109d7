//! # backup_restore
//!
//! Checksummed backup and restore of nested numeric containers.
//!
//! A value is written by walking its type: scalars as raw little-endian bytes,
//! fixed-size arrays element by element, and growable vectors as a `u64`
//! length followed by their elements. A Fletcher-64 checksum is accumulated
//! over exactly those bytes while they are written and appended at the end.
//! Restore walks the same type, recomputes the checksum and compares.
//!
//! ```rust
//! use backup_restore::{ParticipantIdentity, backup, restore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let base = dir.path().join("state");
//!
//! let state: Vec<[f64; 2]> = vec![[5.0; 2]; 100];
//! backup(&state, &base, ParticipantIdentity::SERIAL).unwrap();
//!
//! let mut restored: Vec<[f64; 2]> = Vec::new();
//! restore(&mut restored, &base, ParticipantIdentity::SERIAL).unwrap();
//! assert_eq!(restored, state);
//! ```
//!
//! With more than one participant every rank uses its own file, named after
//! the base path with the rank appended (`state0`, `state1`, ...).
//!
//! ## Features
//! - `canonical` (default): normalize byte order so files are portable between
//!   little- and big-endian hosts

pub mod codec;
pub mod error;
pub mod facility;
pub mod identity;
pub mod stream;
pub mod vector;

pub use codec::Codec;
pub use error::{BackupError, ErrorKind, Result};
pub use facility::{
    Summary, backup, backup_path, backup_to_writer, backup_with, restore, restore_from_reader,
    restore_with,
};
pub use identity::{Communicator, ParticipantIdentity};
pub use stream::{Decoder, Encoder};
pub use vector::{
    Blank, DynamicVector, FixedVector, decode_dynamic_vector, decode_fixed_vector,
    encode_dynamic_vector, encode_fixed_vector,
};

// Re-export the checksum and byte-order building blocks
pub use canonical_bytes::{ByteOrder, HostOrder, Scalar, Swapped, Verbatim};
#[doc(hidden)]
pub use canonical_bytes::bytemuck;
pub use fletcher::{Checksum, Fletcher16, Fletcher64};
