use std::fmt;
use std::hash::{Hash, Hasher};

use crate::dims::{AllDynamic, Dims, Rank, DYNAMIC_EXTENT};
use crate::errors::ExtentsError;
use crate::index::IndexType;
use crate::index_iterator::Indices;

/// Describes the shape of an N-dimensional index space.
///
/// The rank and the static/dynamic pattern of the dimensions are given by the
/// [`Dims`] type `D`, eg. `(Dyn, Fix<8>)`. Sizes of dynamic dimensions are
/// supplied at construction and stored as index type `I`. Sizes of static
/// dimensions are part of the type and take no space.
///
/// ```
/// use mdlayout::{Dyn, Extents, Fix};
///
/// let extents = Extents::<u32, (Dyn, Fix<8>, Dyn)>::new([3, 5]);
/// assert_eq!(extents.shape(), [3, 8, 5]);
///
/// // Sizes can also be given for every dimension, in which case static
/// // dimensions must match.
/// let same = Extents::<u32, (Dyn, Fix<8>, Dyn)>::new([3, 8, 5]);
/// assert_eq!(extents, same);
/// ```
pub struct Extents<I: IndexType, D: Dims> {
    dynamic: D::Storage<I>,
}

/// Extents of rank `R` where every dimension is dynamic.
pub type DExtents<I, const R: usize> = Extents<I, <Rank<R> as AllDynamic>::Dims>;

impl<I: IndexType, D: Dims> Extents<I, D> {
    /// Return the number of dimensions.
    pub const fn rank() -> usize {
        D::RANK
    }

    /// Return the number of dimensions whose size is supplied at runtime.
    pub const fn rank_dynamic() -> usize {
        D::RANK_DYNAMIC
    }

    /// Return the static size of dimension `dim`, or [`DYNAMIC_EXTENT`] if
    /// the dimension is dynamic.
    ///
    /// Panics if `dim >= rank()`.
    pub const fn static_extent(dim: usize) -> usize {
        assert!(dim < D::RANK, "static_extent(): dim is out of range");
        D::STATIC_EXTENTS[dim]
    }

    /// Create extents from a list of sizes.
    ///
    /// `sizes` either contains one size per dynamic dimension, in order, or
    /// one size per dimension. Any other length fails to compile. If sizes
    /// are given for static dimensions, they must match the static size.
    ///
    /// Panics if a size is negative or does not match a static size.
    ///
    /// ```
    /// use mdlayout::{Dyn, Extents, Fix};
    ///
    /// let dynamic_only = Extents::<u8, (Dyn, Fix<2>)>::new([1]);
    /// let full = Extents::<u8, (Dyn, Fix<2>)>::new([1, 2]);
    /// assert_eq!(dynamic_only, full);
    /// ```
    ///
    /// Any other number of sizes is rejected at compile time:
    ///
    /// ```compile_fail
    /// use mdlayout::{Dyn, Extents, Fix};
    ///
    /// Extents::<u8, (Dyn, Fix<2>)>::new([1, 2, 3]);
    /// ```
    pub fn new<const N: usize>(sizes: [I; N]) -> Self {
        Self::try_new(sizes).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Variant of [`new`](Extents::new) which returns an error if a size is
    /// invalid.
    pub fn try_new<const N: usize>(sizes: [I; N]) -> Result<Self, ExtentsError> {
        const {
            assert!(
                N == D::RANK_DYNAMIC || N == D::RANK,
                "number of sizes must equal rank or rank_dynamic"
            );
        }
        if N == D::RANK_DYNAMIC {
            Self::try_from_dynamic(&sizes)
        } else {
            Self::try_from_shape(&sizes)
        }
    }

    /// Create extents from a slice containing the size of every dimension.
    ///
    /// This is the runtime-length counterpart of [`try_new`](Extents::try_new).
    pub fn try_from_shape(shape: &[I]) -> Result<Self, ExtentsError> {
        if shape.len() != D::RANK {
            return Err(ExtentsError::WrongValueCount {
                expected: D::RANK,
                actual: shape.len(),
            });
        }

        let mut dynamic = D::Storage::<I>::default();
        for (dim, &size) in shape.iter().enumerate() {
            if size < I::ZERO {
                return Err(ExtentsError::NegativeExtent { dim });
            }
            let static_size = D::STATIC_EXTENTS[dim];
            if static_size == DYNAMIC_EXTENT {
                D::set_extent(&mut dynamic, dim, size);
            } else if size.to_i128() != static_size as i128 {
                return Err(ExtentsError::StaticMismatch {
                    dim,
                    expected: static_size,
                    actual: size.to_i128(),
                });
            }
        }

        Ok(Extents { dynamic })
    }

    fn try_from_dynamic(sizes: &[I]) -> Result<Self, ExtentsError> {
        if sizes.len() != D::RANK_DYNAMIC {
            return Err(ExtentsError::WrongValueCount {
                expected: D::RANK_DYNAMIC,
                actual: sizes.len(),
            });
        }

        let mut dynamic = D::Storage::<I>::default();
        for (dim, &size) in dynamic_dims::<D>().zip(sizes) {
            if size < I::ZERO {
                return Err(ExtentsError::NegativeExtent { dim });
            }
            D::set_extent(&mut dynamic, dim, size);
        }

        Ok(Extents { dynamic })
    }

    /// Return the size of dimension `dim`.
    ///
    /// Panics if `dim >= rank()`.
    #[inline]
    pub fn extent(&self, dim: usize) -> I {
        D::extent(&self.dynamic, dim)
    }

    /// Return the sizes of all dimensions.
    pub fn shape(&self) -> D::Array<I> {
        D::array_from_fn(|dim| self.extent(dim))
    }

    /// Return true if every component of `index` lies in `[0, extent(dim))`.
    pub fn index_valid(&self, index: D::Array<I>) -> bool {
        index
            .as_ref()
            .iter()
            .enumerate()
            .all(|(dim, &i)| i >= I::ZERO && i < self.extent(dim))
    }

    /// Return an iterator over all valid indices, in row-major order.
    pub fn indices(&self) -> Indices<I, D> {
        Indices::from_extents(self)
    }

    /// Return true if extents with index type `J` and dimension pattern `E`
    /// can be converted to `Self` for any value of the source.
    ///
    /// This holds if the ranks match, every static dimension of `Self` is
    /// static with the same size in the source, and `I` can represent every
    /// value of `J`.
    pub const fn is_convertible_from<J: IndexType, E: Dims>() -> bool {
        if !Self::is_constructible_from::<J, E>() || J::MAX > I::MAX {
            return false;
        }
        let mut dim = 0;
        while dim < D::RANK {
            if D::STATIC_EXTENTS[dim] != DYNAMIC_EXTENT
                && E::STATIC_EXTENTS[dim] == DYNAMIC_EXTENT
            {
                return false;
            }
            dim += 1;
        }
        true
    }

    /// Return true if extents with index type `J` and dimension pattern `E`
    /// can be converted to `Self` for some values of the source.
    ///
    /// This holds if the ranks match and dimensions which are static in both
    /// patterns have the same size.
    pub const fn is_constructible_from<J: IndexType, E: Dims>() -> bool {
        if D::RANK != E::RANK {
            return false;
        }
        let mut dim = 0;
        while dim < D::RANK {
            let to = D::STATIC_EXTENTS[dim];
            let from = E::STATIC_EXTENTS[dim];
            if to != DYNAMIC_EXTENT && from != DYNAMIC_EXTENT && to != from {
                return false;
            }
            dim += 1;
        }
        true
    }

    /// Convert extents with a different index type or dimension pattern.
    ///
    /// The conversion must be lossless (see
    /// [`is_convertible_from`](Extents::is_convertible_from)), otherwise this
    /// fails to compile. Use [`try_from_extents`](Extents::try_from_extents)
    /// for conversions that can fail.
    ///
    /// ```
    /// use mdlayout::DExtents;
    ///
    /// let narrow = DExtents::<u8, 2>::new([3, 4]);
    /// let wide = DExtents::<u64, 2>::from_extents(&narrow);
    /// assert_eq!(wide.shape(), [3, 4]);
    /// ```
    ///
    /// Narrowing the index type may lose information, so it fails to compile:
    ///
    /// ```compile_fail
    /// use mdlayout::DExtents;
    ///
    /// let wide = DExtents::<u64, 2>::new([3, 4]);
    /// let narrow = DExtents::<u8, 2>::from_extents(&wide);
    /// ```
    pub fn from_extents<J: IndexType, E: Dims>(other: &Extents<J, E>) -> Self {
        const {
            assert!(
                Extents::<I, D>::is_convertible_from::<J, E>(),
                "extents conversion may lose information"
            );
        }
        Self::try_from_extents(other).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Convert extents with a different index type or dimension pattern,
    /// checking that static sizes match and that every size is representable
    /// as `I`.
    ///
    /// Conversions between patterns of different rank, or with conflicting
    /// static sizes, fail to compile.
    pub fn try_from_extents<J: IndexType, E: Dims>(
        other: &Extents<J, E>,
    ) -> Result<Self, ExtentsError> {
        const {
            assert!(
                Extents::<I, D>::is_constructible_from::<J, E>(),
                "extents have a different rank or conflicting static extents"
            );
        }

        let mut dynamic = D::Storage::<I>::default();
        for dim in 0..D::RANK {
            let size = other.extent(dim).to_i128();
            let static_size = D::STATIC_EXTENTS[dim];
            if static_size != DYNAMIC_EXTENT {
                if size != static_size as i128 {
                    return Err(ExtentsError::StaticMismatch {
                        dim,
                        expected: static_size,
                        actual: size,
                    });
                }
                continue;
            }
            let size = I::from_i128(size).ok_or(ExtentsError::NotRepresentable { dim })?;
            D::set_extent(&mut dynamic, dim, size);
        }

        Ok(Extents { dynamic })
    }
}

/// Return the positions of the dynamic dimensions in pattern `D`.
fn dynamic_dims<D: Dims>() -> impl Iterator<Item = usize> {
    D::STATIC_EXTENTS
        .iter()
        .enumerate()
        .filter(|(_, &size)| size == DYNAMIC_EXTENT)
        .map(|(dim, _)| dim)
}

impl<I: IndexType, D: Dims> Clone for Extents<I, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: IndexType, D: Dims> Copy for Extents<I, D> {}

impl<I: IndexType, D: Dims> Default for Extents<I, D> {
    /// Return extents where every dynamic size is zero.
    fn default() -> Self {
        Extents {
            dynamic: D::Storage::<I>::default(),
        }
    }
}

impl<I: IndexType, D: Dims> fmt::Debug for Extents<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extents({:?})", self.shape().as_ref())
    }
}

impl<I: IndexType, D: Dims> Hash for Extents<I, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dynamic.hash(state)
    }
}

impl<I, D, J, E> PartialEq<Extents<J, E>> for Extents<I, D>
where
    I: IndexType,
    D: Dims,
    J: IndexType,
    E: Dims,
{
    /// Extents are equal if they have the same rank and the same size in
    /// every dimension, regardless of index type or which dimensions are
    /// static.
    fn eq(&self, other: &Extents<J, E>) -> bool {
        D::RANK == E::RANK
            && (0..D::RANK).all(|dim| self.extent(dim).to_i128() == other.extent(dim).to_i128())
    }
}

impl<I: IndexType, D: Dims> Eq for Extents<I, D> {}
