//! File-level backup and restore.
//!
//! File layout, all scalars little-endian:
//!
//! ```text
//! +---------------------------+
//! | encoded root value        |  <- shape-directed, see `codec`
//! +---------------------------+
//! | checksum (2 or 8 bytes)   |  <- not covered by itself
//! +---------------------------+
//! ```

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use canonical_bytes::{ByteOrder, HostOrder, Scalar};
use fletcher::{Checksum, Fletcher64};
use tracing::{debug, warn};

use crate::codec::Codec;
use crate::error::{BackupError, Result};
use crate::identity::ParticipantIdentity;
use crate::stream::{Decoder, Encoder};

/// File used by `identity` for `base`.
///
/// The decimal rank is appended to the file name when more than one
/// participant takes part; otherwise `base` is used unchanged.
pub fn backup_path<P: AsRef<Path>>(base: P, identity: ParticipantIdentity) -> PathBuf {
    let base = base.as_ref();
    if !identity.is_distributed() {
        return base.to_path_buf();
    }

    let mut name = OsString::from(base.as_os_str());
    name.push(identity.rank().to_string());
    PathBuf::from(name)
}

/// What a finished backup or restore covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary<D> {
    /// Checksum over the payload.
    pub digest: D,
    /// Payload bytes, excluding the trailing checksum.
    pub payload_bytes: u64,
}

/// Encode `value` and its trailing checksum into `writer`.
pub fn backup_to_writer<C, O, V, W>(value: &V, writer: W) -> Result<(W, Summary<C::Digest>)>
where
    C: Checksum,
    C::Digest: Scalar,
    O: ByteOrder,
    V: Codec + ?Sized,
    W: Write,
{
    let mut enc = Encoder::<W, C, O>::new(writer);
    value.encode(&mut enc)?;
    let payload_bytes = enc.bytes_written();
    let (writer, digest) = enc.finish()?;
    Ok((
        writer,
        Summary {
            digest,
            payload_bytes,
        },
    ))
}

/// Decode `value` in place from `reader` and verify the trailing checksum.
///
/// On a checksum mismatch `value` already holds the decoded data; it is not
/// rolled back.
pub fn restore_from_reader<C, O, V, R>(value: &mut V, reader: R) -> Result<(R, Summary<C::Digest>)>
where
    C: Checksum,
    C::Digest: Scalar,
    O: ByteOrder,
    V: Codec + ?Sized,
    R: Read,
{
    let mut dec = Decoder::<R, C, O>::new(reader);
    value.decode(&mut dec)?;
    let payload_bytes = dec.bytes_read();
    let (reader, digest) = dec.finish()?;
    Ok((
        reader,
        Summary {
            digest,
            payload_bytes,
        },
    ))
}

/// Write `value` to this participant's backup file.
///
/// Uses [`Fletcher64`] and the host byte-order strategy.
pub fn backup<V, P>(value: &V, base: P, identity: ParticipantIdentity) -> Result<()>
where
    V: Codec + ?Sized,
    P: AsRef<Path>,
{
    backup_with::<Fletcher64, HostOrder, V, P>(value, base, identity)
}

/// Restore `value` from this participant's backup file.
///
/// Counterpart of [`backup`].
pub fn restore<V, P>(value: &mut V, base: P, identity: ParticipantIdentity) -> Result<()>
where
    V: Codec + ?Sized,
    P: AsRef<Path>,
{
    restore_with::<Fletcher64, HostOrder, V, P>(value, base, identity)
}

/// [`backup`] with an explicit checksum and byte-order strategy.
pub fn backup_with<C, O, V, P>(value: &V, base: P, identity: ParticipantIdentity) -> Result<()>
where
    C: Checksum,
    C::Digest: Scalar,
    O: ByteOrder,
    V: Codec + ?Sized,
    P: AsRef<Path>,
{
    let path = backup_path(base, identity);
    let file = File::create(&path).map_err(|source| BackupError::OpenWrite {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), rank = identity.rank(), "backup opened for write");

    let (_, summary) = backup_to_writer::<C, O, V, _>(value, BufWriter::new(file))?;

    let checksum: u64 = summary.digest.into();
    debug!(
        path = %path.display(),
        rank = identity.rank(),
        bytes = summary.payload_bytes,
        checksum,
        "backup written"
    );
    Ok(())
}

/// [`restore`] with an explicit checksum and byte-order strategy.
pub fn restore_with<C, O, V, P>(value: &mut V, base: P, identity: ParticipantIdentity) -> Result<()>
where
    C: Checksum,
    C::Digest: Scalar,
    O: ByteOrder,
    V: Codec + ?Sized,
    P: AsRef<Path>,
{
    let path = backup_path(base, identity);
    let file = File::open(&path).map_err(|source| BackupError::OpenRead {
        path: path.clone(),
        source,
    })?;
    let size = file.metadata().map(|meta| meta.len()).ok();
    debug!(path = %path.display(), rank = identity.rank(), size = ?size, "backup opened for read");

    match restore_from_reader::<C, O, V, _>(value, BufReader::new(file)) {
        Ok((_, summary)) => {
            let checksum: u64 = summary.digest.into();
            debug!(
                path = %path.display(),
                rank = identity.rank(),
                bytes = summary.payload_bytes,
                checksum,
                "backup restored"
            );
            Ok(())
        }
        Err(err) => {
            warn!(path = %path.display(), rank = identity.rank(), error = %err, "restore failed");
            Err(err)
        }
    }
}
