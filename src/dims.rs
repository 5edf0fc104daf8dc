//! Type-level descriptions of which dimensions of an
//! [`Extents`](crate::Extents) have a size fixed at compile time and which
//! are sized at runtime.
//!
//! A dimension pattern is a tuple of markers, one per dimension. [`Fix<N>`]
//! marks a dimension of size `N` and [`Dyn`] marks a dimension whose size is
//! supplied when the extents are constructed. For example
//! `(Dyn, Fix<8>, Dyn, Dyn)` describes a rank-4 space where the second
//! dimension always has size 8.
//!
//! Only dynamic dimensions have runtime storage, so an all-static pattern is
//! zero-sized.

use std::fmt::Debug;
use std::hash::Hash;

use crate::index::IndexType;

/// Value returned by [`Extents::static_extent`](crate::Extents::static_extent)
/// for dimensions whose size is only known at runtime.
pub const DYNAMIC_EXTENT: usize = usize::MAX;

/// Marker for a dimension whose size is supplied at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dyn;

/// Marker for a dimension whose size is fixed to `N` at compile time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fix<const N: usize>;

/// Trait implemented by the per-dimension markers [`Dyn`] and [`Fix`].
pub trait Dim: Copy + Debug + Default + Send + Sync + 'static {
    /// Size of the dimension, or [`DYNAMIC_EXTENT`] if it is not fixed.
    const STATIC_EXTENT: usize;

    const IS_DYNAMIC: bool = Self::STATIC_EXTENT == DYNAMIC_EXTENT;

    /// Runtime storage needed for this dimension.
    type Storage<I: IndexType>: Copy + Debug + Default + Eq + Hash + Send + Sync;

    /// Return the size of the dimension.
    fn get<I: IndexType>(storage: &Self::Storage<I>) -> I;

    /// Set the size of the dimension. This is a no-op for static dimensions.
    fn set<I: IndexType>(storage: &mut Self::Storage<I>, size: I);
}

impl Dim for Dyn {
    const STATIC_EXTENT: usize = DYNAMIC_EXTENT;

    type Storage<I: IndexType> = I;

    #[inline]
    fn get<I: IndexType>(storage: &I) -> I {
        *storage
    }

    #[inline]
    fn set<I: IndexType>(storage: &mut I, size: I) {
        *storage = size;
    }
}

impl<const N: usize> Dim for Fix<N> {
    const STATIC_EXTENT: usize = N;

    type Storage<I: IndexType> = ();

    #[inline]
    fn get<I: IndexType>(_storage: &()) -> I {
        const {
            assert!(N != DYNAMIC_EXTENT, "static extent is the dynamic sentinel");
            assert!((N as i128) <= I::MAX, "static extent is not representable as index type");
        }
        I::cast_usize(N)
    }

    #[inline]
    fn set<I: IndexType>(_storage: &mut (), _size: I) {}
}

/// Dimension pattern of an [`Extents`](crate::Extents).
///
/// This is implemented for tuples of [`Dyn`] and [`Fix`] markers with up to
/// 8 elements. The empty tuple describes a rank-0 (scalar) index space.
pub trait Dims: Copy + Debug + Default + Send + Sync + 'static {
    /// Number of dimensions.
    const RANK: usize;

    /// Number of dimensions whose size is supplied at runtime.
    const RANK_DYNAMIC: usize;

    /// Static size of each dimension, or [`DYNAMIC_EXTENT`].
    const STATIC_EXTENTS: &'static [usize];

    /// Compact storage holding the sizes of the dynamic dimensions only.
    type Storage<I: IndexType>: Copy + Debug + Default + Eq + Hash + Send + Sync;

    /// Array with one value per dimension. This is the type of indices,
    /// shapes and strides.
    type Array<I: IndexType>: Copy
        + Debug
        + Default
        + Eq
        + Hash
        + Send
        + Sync
        + AsRef<[I]>
        + AsMut<[I]>;

    /// Return the size of dimension `dim`.
    ///
    /// Panics if `dim >= RANK`.
    fn extent<I: IndexType>(storage: &Self::Storage<I>, dim: usize) -> I;

    /// Set the size of dimension `dim`, if it is dynamic.
    ///
    /// Panics if `dim >= RANK`.
    fn set_extent<I: IndexType>(storage: &mut Self::Storage<I>, dim: usize, size: I);

    /// Create an array with one value per dimension, computed by `init`.
    fn array_from_fn<I: IndexType, Init: FnMut(usize) -> I>(init: Init) -> Self::Array<I>;
}

#[cold]
#[inline(never)]
#[track_caller]
fn invalid_dim(dim: usize, rank: usize) -> ! {
    panic!("dim {} is out of range for rank {}", dim, rank)
}

macro_rules! impl_dims {
    ($rank:literal; $($dim:ident $idx:tt),*) => {
        impl<$($dim: Dim),*> Dims for ($($dim,)*) {
            const RANK: usize = $rank;
            const RANK_DYNAMIC: usize = 0 $(+ $dim::IS_DYNAMIC as usize)*;
            const STATIC_EXTENTS: &'static [usize] = &[$($dim::STATIC_EXTENT),*];

            type Storage<I: IndexType> = ($($dim::Storage<I>,)*);
            type Array<I: IndexType> = [I; $rank];

            #[inline]
            #[allow(unused_variables)]
            fn extent<I: IndexType>(storage: &Self::Storage<I>, dim: usize) -> I {
                match dim {
                    $($idx => $dim::get(&storage.$idx),)*
                    _ => invalid_dim(dim, $rank),
                }
            }

            #[inline]
            #[allow(unused_variables)]
            fn set_extent<I: IndexType>(storage: &mut Self::Storage<I>, dim: usize, size: I) {
                match dim {
                    $($idx => $dim::set(&mut storage.$idx, size),)*
                    _ => invalid_dim(dim, $rank),
                }
            }

            #[inline]
            fn array_from_fn<I: IndexType, Init: FnMut(usize) -> I>(init: Init) -> [I; $rank] {
                std::array::from_fn(init)
            }
        }
    };
}

impl_dims!(0;);
impl_dims!(1; A 0);
impl_dims!(2; A 0, B 1);
impl_dims!(3; A 0, B 1, C 2);
impl_dims!(4; A 0, B 1, C 2, D 3);
impl_dims!(5; A 0, B 1, C 2, D 3, E 4);
impl_dims!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_dims!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_dims!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Type-level rank, used to name the all-dynamic pattern of a given rank.
pub struct Rank<const R: usize>;

/// Maps a [`Rank`] to the dimension pattern where every dimension is
/// [`Dyn`].
pub trait AllDynamic {
    type Dims: Dims;
}

macro_rules! impl_all_dynamic {
    ($rank:literal, $dims:ty) => {
        impl AllDynamic for Rank<$rank> {
            type Dims = $dims;
        }
    };
}

impl_all_dynamic!(0, ());
impl_all_dynamic!(1, (Dyn,));
impl_all_dynamic!(2, (Dyn, Dyn));
impl_all_dynamic!(3, (Dyn, Dyn, Dyn));
impl_all_dynamic!(4, (Dyn, Dyn, Dyn, Dyn));
impl_all_dynamic!(5, (Dyn, Dyn, Dyn, Dyn, Dyn));
impl_all_dynamic!(6, (Dyn, Dyn, Dyn, Dyn, Dyn, Dyn));
impl_all_dynamic!(7, (Dyn, Dyn, Dyn, Dyn, Dyn, Dyn, Dyn));
impl_all_dynamic!(8, (Dyn, Dyn, Dyn, Dyn, Dyn, Dyn, Dyn, Dyn));
