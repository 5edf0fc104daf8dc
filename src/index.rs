//! Integer types used for extents, indices and offsets.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Div, Mul, Rem, Sub};

/// Integer type used for the sizes of dimensions, the indices passed to a
/// mapping and the offsets it produces.
///
/// This is implemented for the primitive signed and unsigned integer types up
/// to 64 bits. Signed types are supported, but negative sizes and indices are
/// never valid.
///
/// Conversions between different index types go via `i128`, which can
/// represent every value of every implementing type.
pub trait IndexType:
    Copy
    + Debug
    + Display
    + Default
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    /// Smallest value of this type, widened to `i128`.
    const MIN: i128;

    /// Largest value of this type, widened to `i128`.
    const MAX: i128;

    /// Name of the type, used in diagnostics.
    const NAME: &'static str;

    /// Widen to `i128`. This is lossless for all implementations.
    fn to_i128(self) -> i128;

    /// Convert from `i128`, or return `None` if `value` is out of range.
    fn from_i128(value: i128) -> Option<Self>;

    /// Convert from `usize` using an `as` cast.
    ///
    /// This must only be used for values which are known to be in range,
    /// eg. static extents that have been checked at compile time.
    fn cast_usize(value: usize) -> Self;

    /// Convert to `usize` for use as a slice offset or length.
    ///
    /// Panics if the value is negative or larger than `usize::MAX`.
    fn as_usize(self) -> usize;
}

macro_rules! impl_index_type {
    ($type:ty) => {
        impl IndexType for $type {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: i128 = <$type>::MIN as i128;
            const MAX: i128 = <$type>::MAX as i128;
            const NAME: &'static str = stringify!($type);

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn from_i128(value: i128) -> Option<Self> {
                <$type>::try_from(value).ok()
            }

            #[inline]
            fn cast_usize(value: usize) -> Self {
                value as $type
            }

            #[inline]
            fn as_usize(self) -> usize {
                usize::try_from(self).unwrap_or_else(|_| {
                    panic!("{} value {} is not a valid usize", Self::NAME, self)
                })
            }
        }
    };
}

impl_index_type!(i8);
impl_index_type!(i16);
impl_index_type!(i32);
impl_index_type!(i64);
impl_index_type!(isize);
impl_index_type!(u8);
impl_index_type!(u16);
impl_index_type!(u32);
impl_index_type!(u64);
impl_index_type!(usize);

/// Return true if `value` can be represented by index type `I`.
#[inline]
pub fn is_representable_as<I: IndexType>(value: i128) -> bool {
    value >= I::MIN && value <= I::MAX
}

#[cfg(test)]
mod tests {
    use super::{is_representable_as, IndexType};

    #[test]
    fn test_limits() {
        assert_eq!(<u8 as IndexType>::MAX, 255);
        assert_eq!(<u8 as IndexType>::MIN, 0);
        assert_eq!(<i8 as IndexType>::MIN, -128);
        assert_eq!(<u64 as IndexType>::MAX, u64::MAX as i128);
        assert_eq!(<i32 as IndexType>::NAME, "i32");
    }

    #[test]
    fn test_from_i128() {
        assert_eq!(u8::from_i128(255), Some(255u8));
        assert_eq!(u8::from_i128(256), None);
        assert_eq!(u8::from_i128(-1), None);
        assert_eq!(i8::from_i128(-128), Some(-128i8));
        assert_eq!(u64::from_i128(u64::MAX as i128), Some(u64::MAX));
    }

    #[test]
    fn test_is_representable_as() {
        assert!(is_representable_as::<u16>(65535));
        assert!(!is_representable_as::<u16>(65536));
        assert!(!is_representable_as::<u32>(-1));
        assert!(is_representable_as::<i64>(-1));
    }

    #[test]
    fn test_as_usize() {
        assert_eq!(42i32.as_usize(), 42);
        assert_eq!(7u8.as_usize(), 7);
    }

    #[test]
    #[should_panic(expected = "i32 value -1 is not a valid usize")]
    fn test_as_usize_negative() {
        (-1i32).as_usize();
    }
}
