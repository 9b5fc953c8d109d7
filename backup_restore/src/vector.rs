//! Container capabilities the codec needs from collaborator types.
//!
//! A container only has to report its size, grow or shrink to a requested
//! length, and hand out its elements by index. The traversal functions here
//! are the building blocks behind the `[T; N]` and `Vec<T>` codecs, and behind
//! [`fixed_vector_codec!`](crate::fixed_vector_codec) /
//! [`dynamic_vector_codec!`](crate::dynamic_vector_codec) for external types.

use std::collections::{TryReserveError, VecDeque};
use std::io::{Read, Write};

use canonical_bytes::ByteOrder;
use fletcher::Checksum;

use crate::codec::Codec;
use crate::error::Result;
use crate::stream::{Decoder, Encoder};

/// Value a growable container is extended with before the decoder
/// overwrites it.
///
/// Implemented for scalars (all-zero), arrays of any length, `Vec`,
/// `VecDeque` and `Box`. An external container stored inside a `Vec`
/// implements it itself, usually with an empty or zeroed value.
pub trait Blank {
    fn blank() -> Self;
}

impl<T: Blank, const N: usize> Blank for [T; N] {
    fn blank() -> Self {
        std::array::from_fn(|_| T::blank())
    }
}

impl<T> Blank for Vec<T> {
    fn blank() -> Self {
        Vec::new()
    }
}

impl<T> Blank for VecDeque<T> {
    fn blank() -> Self {
        VecDeque::new()
    }
}

impl<T: Blank> Blank for Box<T> {
    fn blank() -> Self {
        Box::new(T::blank())
    }
}

/// Container whose element count is fixed by its type.
pub trait FixedVector {
    type Item;

    /// Element count, known at compile time.
    const LEN: usize;

    fn item(&self, index: usize) -> &Self::Item;
    fn item_mut(&mut self, index: usize) -> &mut Self::Item;
}

/// Container whose element count is decided at runtime.
pub trait DynamicVector {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the element count to exactly `len`.
    ///
    /// Retained elements keep their values; new ones hold any valid value,
    /// they are overwritten by the decoder.
    fn resize(&mut self, len: usize) -> std::result::Result<(), TryReserveError>;

    fn item(&self, index: usize) -> &Self::Item;
    fn item_mut(&mut self, index: usize) -> &mut Self::Item;
}

/// Encode every element in index order, with no length prefix.
pub fn encode_fixed_vector<V, W, C, O>(vector: &V, enc: &mut Encoder<W, C, O>) -> Result<()>
where
    V: FixedVector + ?Sized,
    V::Item: Codec,
    W: Write,
    C: Checksum,
    O: ByteOrder,
{
    for i in 0..V::LEN {
        vector.item(i).encode(enc)?;
    }
    Ok(())
}

/// Decode `V::LEN` elements in place.
pub fn decode_fixed_vector<V, R, C, O>(vector: &mut V, dec: &mut Decoder<R, C, O>) -> Result<()>
where
    V: FixedVector + ?Sized,
    V::Item: Codec,
    R: Read,
    C: Checksum,
    O: ByteOrder,
{
    for i in 0..V::LEN {
        vector.item_mut(i).decode(dec)?;
    }
    Ok(())
}

/// Encode the length prefix, then every element in index order.
pub fn encode_dynamic_vector<V, W, C, O>(vector: &V, enc: &mut Encoder<W, C, O>) -> Result<()>
where
    V: DynamicVector + ?Sized,
    V::Item: Codec,
    W: Write,
    C: Checksum,
    O: ByteOrder,
{
    let len = vector.len();
    enc.write_length(len)?;
    for i in 0..len {
        vector.item(i).encode(enc)?;
    }
    Ok(())
}

/// Decode the length prefix, resize the target, then decode that many elements.
pub fn decode_dynamic_vector<V, R, C, O>(vector: &mut V, dec: &mut Decoder<R, C, O>) -> Result<()>
where
    V: DynamicVector + ?Sized,
    V::Item: Codec,
    R: Read,
    C: Checksum,
    O: ByteOrder,
{
    let len = dec.read_length()?;
    vector.resize(len)?;
    for i in 0..len {
        vector.item_mut(i).decode(dec)?;
    }
    Ok(())
}

impl<T, const N: usize> FixedVector for [T; N] {
    type Item = T;
    const LEN: usize = N;

    #[inline]
    fn item(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }
}

impl<T: Blank> DynamicVector for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn resize(&mut self, len: usize) -> std::result::Result<(), TryReserveError> {
        if len > Vec::len(self) {
            self.try_reserve_exact(len - Vec::len(self))?;
        }
        self.resize_with(len, T::blank);
        Ok(())
    }

    #[inline]
    fn item(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }
}

impl<T: Blank> DynamicVector for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn resize(&mut self, len: usize) -> std::result::Result<(), TryReserveError> {
        if len > VecDeque::len(self) {
            self.try_reserve_exact(len - VecDeque::len(self))?;
        }
        self.resize_with(len, T::blank);
        Ok(())
    }

    #[inline]
    fn item(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }
}
