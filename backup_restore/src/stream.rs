//! Lock-step byte streams.
//!
//! [`Encoder`] and [`Decoder`] wrap a byte stream together with a running
//! checksum. Every scalar that crosses the stream is normalized to canonical
//! byte order and fed to the checksum in the same call, so the checksum always
//! covers exactly the bytes on disk, in order.

use std::io::{self, Read, Write};
use std::marker::PhantomData;

use bytemuck::Zeroable;
use canonical_bytes::{ByteOrder, HostOrder, Scalar};
use fletcher::{Checksum, Fletcher64};

use crate::error::{BackupError, Result};

/// Checksummed writer of canonical scalars.
pub struct Encoder<W, C = Fletcher64, O = HostOrder> {
    sink: W,
    checksum: C,
    written: u64,
    _order: PhantomData<O>,
}

impl<W: Write, C: Checksum, O: ByteOrder> Encoder<W, C, O> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            checksum: C::default(),
            written: 0,
            _order: PhantomData,
        }
    }

    /// Write one scalar in canonical order and fold its bytes into the checksum.
    #[inline]
    pub fn write_scalar<S: Scalar>(&mut self, value: S) -> Result<()> {
        let canonical = O::to_canonical(value);
        let bytes = bytemuck::bytes_of(&canonical);
        self.sink.write_all(bytes)?;
        self.checksum.update(bytes);
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Write a dynamic vector length as a 64-bit prefix.
    #[inline]
    pub fn write_length(&mut self, len: usize) -> Result<()> {
        self.write_scalar(len as u64)
    }

    /// Payload bytes written so far, excluding the trailer.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Checksum over the payload written so far.
    pub fn checksum(&self) -> C::Digest {
        self.checksum.finalize()
    }

    /// Append the finalized checksum and flush.
    ///
    /// The trailer is written in canonical order but is not itself checksummed.
    pub fn finish(mut self) -> Result<(W, C::Digest)>
    where
        C::Digest: Scalar,
    {
        let digest = self.checksum.finalize();
        let canonical = O::to_canonical(digest);
        self.sink.write_all(bytemuck::bytes_of(&canonical))?;
        self.sink.flush()?;
        Ok((self.sink, digest))
    }
}

/// Checksummed reader of canonical scalars.
pub struct Decoder<R, C = Fletcher64, O = HostOrder> {
    source: R,
    checksum: C,
    read: u64,
    _order: PhantomData<O>,
}

impl<R: Read, C: Checksum, O: ByteOrder> Decoder<R, C, O> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            checksum: C::default(),
            read: 0,
            _order: PhantomData,
        }
    }

    /// Read one scalar, checksumming the bytes as they appear on disk.
    #[inline]
    pub fn read_scalar<S: Scalar>(&mut self) -> Result<S> {
        let mut canonical = S::zeroed();
        let bytes = bytemuck::bytes_of_mut(&mut canonical);
        fill(&mut self.source, bytes, self.read)?;
        self.checksum.update(bytes);
        self.read += bytes.len() as u64;
        Ok(O::from_canonical(canonical))
    }

    /// Read a 64-bit length prefix.
    pub fn read_length(&mut self) -> Result<usize> {
        let len: u64 = self.read_scalar()?;
        usize::try_from(len).map_err(|_| BackupError::LengthOverflow(len))
    }

    /// Payload bytes consumed so far, excluding the trailer.
    pub fn bytes_read(&self) -> u64 {
        self.read
    }

    /// Checksum over the payload read so far.
    pub fn checksum(&self) -> C::Digest {
        self.checksum.finalize()
    }

    /// Read the stored checksum and compare it with the one accumulated.
    ///
    /// A stream that ends before the trailer is complete fails with
    /// [`BackupError::Truncated`]. Anything after the trailer is left unread.
    pub fn finish(mut self) -> Result<(R, C::Digest)>
    where
        C::Digest: Scalar,
    {
        let computed = self.checksum.finalize();

        let mut canonical = <C::Digest as Zeroable>::zeroed();
        fill(&mut self.source, bytemuck::bytes_of_mut(&mut canonical), self.read)?;
        let stored = O::from_canonical(canonical);

        if stored != computed {
            return Err(BackupError::ChecksumMismatch {
                stored: stored.into(),
                computed: computed.into(),
            });
        }
        Ok((self.source, computed))
    }
}

/// `read_exact` that reports a short stream as truncation at `offset`.
fn fill<R: Read>(source: &mut R, buf: &mut [u8], offset: u64) -> Result<()> {
    source.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => BackupError::Truncated { offset },
        _ => BackupError::Io(err),
    })
}
