//! Shape-directed encoding.
//!
//! The codec for a value is chosen by its type, never by a tag on disk:
//!
//! - scalars are written as their raw canonical bytes,
//! - fixed vectors (`[T; N]`) as their `N` elements back to back,
//! - dynamic vectors (`Vec<T>`, `VecDeque<T>`) as a `u64` length followed by
//!   the elements.
//!
//! Recursion bottoms out at scalars, so a `Vec<Vec<[f64; 3]>>` is handled by
//! three nested monomorphized calls.

use std::collections::VecDeque;
use std::io::{Read, Write};

use canonical_bytes::ByteOrder;
use fletcher::Checksum;

use crate::error::Result;
use crate::stream::{Decoder, Encoder};
use crate::vector::{
    Blank, decode_dynamic_vector, decode_fixed_vector, encode_dynamic_vector, encode_fixed_vector,
};

/// A value that can be backed up and restored in place.
pub trait Codec {
    fn encode<W: Write, C: Checksum, O: ByteOrder>(&self, enc: &mut Encoder<W, C, O>)
    -> Result<()>;

    /// Overwrite `self` with the next value from `dec`.
    ///
    /// On error `self` may be left partially updated.
    fn decode<R: Read, C: Checksum, O: ByteOrder>(
        &mut self,
        dec: &mut Decoder<R, C, O>,
    ) -> Result<()>;
}

/// Implement [`Codec`] and [`Blank`] for types that implement
/// [`Scalar`](canonical_bytes::Scalar).
///
/// ```rust
/// use backup_restore::{Scalar, scalar_codec};
/// use bytemuck_derive::{Pod, Zeroable};
///
/// #[repr(transparent)]
/// #[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
/// struct Kelvin(f64);
///
/// impl Scalar for Kelvin {
///     fn swap_bytes(self) -> Self {
///         Kelvin(self.0.swap_bytes())
///     }
/// }
///
/// scalar_codec!(Kelvin);
/// ```
#[macro_export]
macro_rules! scalar_codec {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::Codec for $t {
                #[inline]
                fn encode<W: ::std::io::Write, C: $crate::Checksum, O: $crate::ByteOrder>(
                    &self,
                    enc: &mut $crate::Encoder<W, C, O>,
                ) -> $crate::Result<()> {
                    enc.write_scalar(*self)
                }

                #[inline]
                fn decode<R: ::std::io::Read, C: $crate::Checksum, O: $crate::ByteOrder>(
                    &mut self,
                    dec: &mut $crate::Decoder<R, C, O>,
                ) -> $crate::Result<()> {
                    *self = dec.read_scalar()?;
                    Ok(())
                }
            }

            impl $crate::Blank for $t {
                #[inline]
                fn blank() -> Self {
                    <$t as $crate::bytemuck::Zeroable>::zeroed()
                }
            }
        )*
    };
}

/// Implement [`Codec`] for an external type through [`FixedVector`](crate::FixedVector).
///
/// Generic parameters go in brackets before the type:
/// `fixed_vector_codec!([T, const N: usize] FieldVector<T, N>);`
#[macro_export]
macro_rules! fixed_vector_codec {
    ([$($generics:tt)*] $t:ty) => {
        impl<$($generics)*> $crate::Codec for $t
        where
            $t: $crate::FixedVector,
            <$t as $crate::FixedVector>::Item: $crate::Codec,
        {
            fn encode<W: ::std::io::Write, C: $crate::Checksum, O: $crate::ByteOrder>(
                &self,
                enc: &mut $crate::Encoder<W, C, O>,
            ) -> $crate::Result<()> {
                $crate::encode_fixed_vector(self, enc)
            }

            fn decode<R: ::std::io::Read, C: $crate::Checksum, O: $crate::ByteOrder>(
                &mut self,
                dec: &mut $crate::Decoder<R, C, O>,
            ) -> $crate::Result<()> {
                $crate::decode_fixed_vector(self, dec)
            }
        }
    };
    ($t:ty) => {
        $crate::fixed_vector_codec!([] $t);
    };
}

/// Implement [`Codec`] for an external type through [`DynamicVector`](crate::DynamicVector).
///
/// Same syntax as [`fixed_vector_codec!`](crate::fixed_vector_codec).
#[macro_export]
macro_rules! dynamic_vector_codec {
    ([$($generics:tt)*] $t:ty) => {
        impl<$($generics)*> $crate::Codec for $t
        where
            $t: $crate::DynamicVector,
            <$t as $crate::DynamicVector>::Item: $crate::Codec,
        {
            fn encode<W: ::std::io::Write, C: $crate::Checksum, O: $crate::ByteOrder>(
                &self,
                enc: &mut $crate::Encoder<W, C, O>,
            ) -> $crate::Result<()> {
                $crate::encode_dynamic_vector(self, enc)
            }

            fn decode<R: ::std::io::Read, C: $crate::Checksum, O: $crate::ByteOrder>(
                &mut self,
                dec: &mut $crate::Decoder<R, C, O>,
            ) -> $crate::Result<()> {
                $crate::decode_dynamic_vector(self, dec)
            }
        }
    };
    ($t:ty) => {
        $crate::dynamic_vector_codec!([] $t);
    };
}

scalar_codec!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl<T: Codec, const N: usize> Codec for [T; N] {
    fn encode<W: Write, C: Checksum, O: ByteOrder>(&self, enc: &mut Encoder<W, C, O>) -> Result<()> {
        encode_fixed_vector(self, enc)
    }

    fn decode<R: Read, C: Checksum, O: ByteOrder>(
        &mut self,
        dec: &mut Decoder<R, C, O>,
    ) -> Result<()> {
        decode_fixed_vector(self, dec)
    }
}

impl<T: Codec + Blank> Codec for Vec<T> {
    fn encode<W: Write, C: Checksum, O: ByteOrder>(&self, enc: &mut Encoder<W, C, O>) -> Result<()> {
        encode_dynamic_vector(self, enc)
    }

    fn decode<R: Read, C: Checksum, O: ByteOrder>(
        &mut self,
        dec: &mut Decoder<R, C, O>,
    ) -> Result<()> {
        decode_dynamic_vector(self, dec)
    }
}

impl<T: Codec + Blank> Codec for VecDeque<T> {
    fn encode<W: Write, C: Checksum, O: ByteOrder>(&self, enc: &mut Encoder<W, C, O>) -> Result<()> {
        encode_dynamic_vector(self, enc)
    }

    fn decode<R: Read, C: Checksum, O: ByteOrder>(
        &mut self,
        dec: &mut Decoder<R, C, O>,
    ) -> Result<()> {
        decode_dynamic_vector(self, dec)
    }
}

impl<T: Codec + ?Sized> Codec for Box<T> {
    fn encode<W: Write, C: Checksum, O: ByteOrder>(&self, enc: &mut Encoder<W, C, O>) -> Result<()> {
        (**self).encode(enc)
    }

    fn decode<R: Read, C: Checksum, O: ByteOrder>(
        &mut self,
        dec: &mut Decoder<R, C, O>,
    ) -> Result<()> {
        (**self).decode(dec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackupError;
    use canonical_bytes::HostOrder;
    use fletcher::Fletcher64;
    use std::io::Cursor;

    fn encode<V: Codec>(value: &V) -> Vec<u8> {
        let mut enc = Encoder::<_, Fletcher64, HostOrder>::new(Vec::new());
        value.encode(&mut enc).unwrap();
        let (bytes, _) = enc.finish().unwrap();
        bytes
    }

    fn decode_into<V: Codec>(bytes: Vec<u8>, target: &mut V) -> Result<()> {
        let mut dec = Decoder::<_, Fletcher64, HostOrder>::new(Cursor::new(bytes));
        target.decode(&mut dec)?;
        dec.finish()?;
        Ok(())
    }

    #[test]
    fn fixed_vector_has_no_length_prefix() {
        let bytes = encode(&[1u32, 2, 3]);
        assert_eq!(bytes.len(), 3 * 4 + 8);
        assert_eq!(&bytes[..4], &1u32.to_le_bytes());
    }

    #[test]
    fn empty_dynamic_vector_is_a_zero_length_field() {
        let bytes = encode(&Vec::<f64>::new());
        // payload of eight zero bytes checksums to zero
        assert_eq!(bytes, [0u8; 16]);

        let mut restored = vec![1.0f64, 2.0];
        decode_into(bytes, &mut restored).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn dynamic_vector_writes_length_then_elements() {
        let bytes = encode(&vec![0xAAu8, 0xBB]);
        assert_eq!(&bytes[..8], &2u64.to_le_bytes());
        assert_eq!(&bytes[8..10], &[0xAA, 0xBB]);
        assert_eq!(bytes.len(), 8 + 2 + 8);
    }

    #[test]
    fn nested_vectors_of_distinct_lengths() {
        let nested: Vec<Vec<[f64; 1]>> = (0..10).map(|i| vec![[i as f64]; i]).collect();
        let bytes = encode(&nested);
        assert_eq!(bytes.len(), 448 + 8);
        assert_eq!(&bytes[448..], &0x4432_0037_dea2_0eb0u64.to_le_bytes());

        let mut restored: Vec<Vec<[f64; 1]>> = Vec::new();
        decode_into(bytes, &mut restored).unwrap();
        assert_eq!(restored.len(), 10);
        for (i, inner) in restored.iter().enumerate() {
            assert_eq!(inner.len(), i);
            assert!(inner.iter().all(|x| x[0] == i as f64));
        }
    }

    #[test]
    fn deque_and_box_roundtrip() {
        let value: Box<VecDeque<[i16; 2]>> = Box::new(VecDeque::from([[1, -1], [2, -2]]));
        let bytes = encode(&value);

        let mut restored: Box<VecDeque<[i16; 2]>> = Box::default();
        decode_into(bytes, &mut restored).unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn vector_of_long_arrays_roundtrip() {
        let value: Vec<[f64; 64]> = vec![std::array::from_fn(|i| i as f64 * 0.5); 3];
        let bytes = encode(&value);
        assert_eq!(bytes.len(), 8 + 3 * 64 * 8 + 8);

        let mut restored: Vec<[f64; 64]> = Vec::new();
        decode_into(bytes, &mut restored).unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn restore_overwrites_existing_contents() {
        let bytes = encode(&vec![[7u64; 2]; 2]);
        let mut restored = vec![[0u64; 2]; 5];
        decode_into(bytes, &mut restored).unwrap();
        assert_eq!(restored, vec![[7u64; 2]; 2]);
    }

    #[test]
    fn absurd_length_is_a_resource_error() {
        let mut bytes = u64::MAX.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 8]);

        let mut restored: Vec<u64> = Vec::new();
        let err = decode_into(bytes, &mut restored).unwrap_err();
        assert!(matches!(
            err,
            BackupError::Allocation(_) | BackupError::LengthOverflow(_)
        ));
    }
}
