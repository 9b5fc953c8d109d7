use bytemuck::Pod;

/// A fixed-width plain-old-data leaf value.
///
/// `swap_bytes` must reverse the in-memory byte sequence of the value. For a
/// `#[repr(transparent)]` newtype that is the inner value's `swap_bytes`.
///
/// ```rust
/// use canonical_bytes::Scalar;
/// use bytemuck_derive::{Pod, Zeroable};
///
/// #[repr(transparent)]
/// #[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
/// struct Pressure(f64);
///
/// impl Scalar for Pressure {
///     fn swap_bytes(self) -> Self {
///         Pressure(self.0.swap_bytes())
///     }
/// }
///
/// let p = Pressure(101.325);
/// assert_eq!(p.swap_bytes().swap_bytes(), p);
/// ```
pub trait Scalar: Pod {
    /// Reverse the byte order of the value.
    fn swap_bytes(self) -> Self;
}

macro_rules! int_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn swap_bytes(self) -> Self {
                    <$t>::swap_bytes(self)
                }
            }
        )*
    };
}

int_scalar!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl Scalar for f32 {
    #[inline]
    fn swap_bytes(self) -> Self {
        f32::from_bits(self.to_bits().swap_bytes())
    }
}

impl Scalar for f64 {
    #[inline]
    fn swap_bytes(self) -> Self {
        f64::from_bits(self.to_bits().swap_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_swap_reverses_bytes() {
        let v: u32 = 0x0102_0304;
        assert_eq!(Scalar::swap_bytes(v).to_ne_bytes(), {
            let mut b = v.to_ne_bytes();
            b.reverse();
            b
        });
    }

    #[test]
    fn single_byte_swap_is_identity() {
        assert_eq!(Scalar::swap_bytes(0xABu8), 0xAB);
        assert_eq!(Scalar::swap_bytes(-3i8), -3);
    }

    #[test]
    fn float_swap_preserves_bits_through_double_swap() {
        let v = f64::from_bits(0x7FF8_0000_0000_0001); // NaN payload
        let back = Scalar::swap_bytes(Scalar::swap_bytes(v));
        assert_eq!(back.to_bits(), v.to_bits());

        let f = 3.5f32;
        assert_eq!(Scalar::swap_bytes(f).to_bits(), f.to_bits().swap_bytes());
    }
}
