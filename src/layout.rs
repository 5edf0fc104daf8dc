use std::fmt;
use std::hash::{Hash, Hasher};

use rayon::prelude::*;

use crate::dims::{Dims, DYNAMIC_EXTENT};
use crate::errors::MappingError;
use crate::extents::Extents;
use crate::index::{is_representable_as, IndexType};
use crate::index_iterator::Indices;

/// Mappings convert a multi-dimensional index within the domain described by
/// an [`Extents`] into a linear offset.
///
/// Offsets produced for valid indices lie in `[0, required_span_size())`.
/// The `IS_ALWAYS_*` constants describe properties that hold for every
/// mapping of the implementing type, and can be used to decide whether bulk
/// operations on the underlying storage (eg. a contiguous copy) are valid.
pub trait Mapping {
    /// Integer type of sizes, indices and offsets.
    type Index: IndexType;

    /// Static/dynamic dimension pattern of the domain.
    type Dims: Dims;

    /// True if distinct indices always map to distinct offsets.
    const IS_ALWAYS_UNIQUE: bool;

    /// True if every offset in the span is produced by some index.
    const IS_ALWAYS_EXHAUSTIVE: bool;

    /// True if every dimension has a fixed stride.
    const IS_ALWAYS_STRIDED: bool;

    /// Return the domain of the mapping.
    fn extents(&self) -> &Extents<Self::Index, Self::Dims>;

    /// Return the minimum length of storage which can be indexed with offsets
    /// produced by this mapping.
    fn required_span_size(&self) -> Self::Index;

    /// Map an index to an offset, without checking if it is valid for the
    /// domain.
    ///
    /// This method is not itself unsafe, because it only computes an offset
    /// and does not access any data. The result for an out of bounds index is
    /// unspecified.
    fn offset_unchecked(&self, index: <Self::Dims as Dims>::Array<Self::Index>) -> Self::Index;

    /// Return the distance between offsets of indices that differ by one in
    /// dimension `dim`.
    ///
    /// Panics if `dim` is not a valid dimension. Implementations may reject
    /// calls on rank-0 mappings at compile time.
    fn stride(&self, dim: usize) -> Self::Index;

    /// Map an index to an offset.
    ///
    /// In debug builds, or if the `checked-index` feature is enabled, this
    /// panics if any component of the index is out of bounds. Otherwise the
    /// result for an out of bounds index is unspecified.
    #[inline]
    #[track_caller]
    fn offset(&self, index: <Self::Dims as Dims>::Array<Self::Index>) -> Self::Index {
        if cfg!(any(debug_assertions, feature = "checked-index"))
            && !self.extents().index_valid(index)
        {
            index_out_of_bounds(index.as_ref(), self.extents());
        }
        self.offset_unchecked(index)
    }

    /// Map an index to an offset, or return `None` if the index is out of
    /// bounds.
    #[inline]
    fn try_offset(&self, index: <Self::Dims as Dims>::Array<Self::Index>) -> Option<Self::Index> {
        self.extents()
            .index_valid(index)
            .then(|| self.offset_unchecked(index))
    }

    fn is_unique(&self) -> bool {
        Self::IS_ALWAYS_UNIQUE
    }

    fn is_exhaustive(&self) -> bool {
        Self::IS_ALWAYS_EXHAUSTIVE
    }

    fn is_strided(&self) -> bool {
        Self::IS_ALWAYS_STRIDED
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn index_out_of_bounds<I: fmt::Debug, E: fmt::Debug>(index: &[I], extents: &E) -> ! {
    panic!("index {:?} out of bounds for {:?}", index, extents)
}

/// Row-major mapping, where the last dimension varies fastest.
///
/// For an index `[i0, i1, ... iN]` the offset is
/// `((i0 * E1 + i1) * E2 + i2) ... * EN + iN`, where `Ek` is the size of
/// dimension `k`.
///
/// ```
/// use mdlayout::{Dyn, Extents, Fix, LayoutRight, Mapping};
///
/// let mapping = LayoutRight::new(Extents::<i64, (Dyn, Fix<8>)>::new([3]));
/// assert_eq!(mapping.required_span_size(), 24);
/// assert_eq!(mapping.offset([1, 2]), 10);
/// assert_eq!(mapping.strides(), [8, 1]);
/// ```
///
/// Mappings of the same rank can be compared, regardless of their index type
/// or which dimensions are static:
///
/// ```
/// use mdlayout::{DExtents, Dyn, Extents, Fix, LayoutRight};
///
/// let a = LayoutRight::new(Extents::<u32, (Dyn, Fix<4>)>::new([3]));
/// let b = LayoutRight::new(DExtents::<i64, 2>::new([3, 4]));
/// assert_eq!(a, b);
/// ```
///
/// Comparing mappings of different rank fails to compile:
///
/// ```compile_fail
/// use mdlayout::{DExtents, LayoutRight};
///
/// let a = LayoutRight::new(DExtents::<u32, 1>::new([12]));
/// let b = LayoutRight::new(DExtents::<u32, 2>::new([3, 4]));
/// let _ = a == b;
/// ```
///
/// A rank-0 mapping has a span of one and no strides. Asking for the stride
/// of a dimension fails to compile:
///
/// ```compile_fail
/// use mdlayout::{Extents, LayoutRight, Mapping};
///
/// let scalar = LayoutRight::new(Extents::<u32, ()>::new([]));
/// scalar.stride(0);
/// ```
pub struct LayoutRight<I: IndexType, D: Dims> {
    extents: Extents<I, D>,
}

impl<I: IndexType, D: Dims> LayoutRight<I, D> {
    /// Create a mapping for a domain.
    ///
    /// The product of the non-zero sizes must be representable as `I`. This
    /// ensures every stride is representable too, so a domain such as
    /// `[16, 0, 16]` is rejected for `u8` even though its span is zero.
    ///
    /// If the product of the static sizes alone is not representable, this
    /// fails to compile. This applies to patterns with dynamic dimensions as
    /// well as all-static ones.
    ///
    /// Panics if the product including the dynamic sizes is not
    /// representable as `I`.
    ///
    /// ```
    /// use mdlayout::{Extents, Fix, LayoutRight, Mapping};
    ///
    /// let mapping = LayoutRight::new(Extents::<u8, (Fix<15>, Fix<17>)>::new([]));
    /// assert_eq!(mapping.required_span_size(), 255);
    /// ```
    ///
    /// ```compile_fail
    /// use mdlayout::{Extents, Fix, LayoutRight};
    ///
    /// LayoutRight::new(Extents::<u8, (Fix<16>, Fix<16>)>::new([]));
    /// ```
    pub fn new(extents: Extents<I, D>) -> Self {
        Self::try_new(extents).unwrap_or_else(|err| panic!("{}", err))
    }

    /// Variant of [`new`](LayoutRight::new) which returns an error if the
    /// domain is too large for the index type.
    ///
    /// The domain is too large if the product of its non-zero sizes is not
    /// representable as `I`.
    ///
    /// ```
    /// use mdlayout::{errors::MappingError, DExtents, LayoutRight, Mapping};
    ///
    /// let mapping = LayoutRight::try_new(DExtents::<u8, 3>::new([0, 15, 17]));
    /// assert_eq!(mapping.map(|m| m.required_span_size()), Ok(0));
    ///
    /// let mapping = LayoutRight::try_new(DExtents::<u8, 3>::new([16, 0, 16]));
    /// assert_eq!(mapping, Err(MappingError::SpanTooLarge));
    /// ```
    pub fn try_new(extents: Extents<I, D>) -> Result<Self, MappingError> {
        check_static_span::<I, D>();

        if D::RANK_DYNAMIC > 0 && !span_fits(&extents) {
            return Err(MappingError::SpanTooLarge);
        }
        Ok(LayoutRight { extents })
    }

    /// Convert a mapping with a different index type or dimension pattern,
    /// where the conversion of the extents is lossless.
    ///
    /// See [`Extents::from_extents`].
    pub fn from_mapping<J: IndexType, E: Dims>(other: &LayoutRight<J, E>) -> Self {
        Self::new(Extents::from_extents(other.extents()))
    }

    /// Convert a mapping with a different index type or dimension pattern,
    /// checking that the extents and span are representable.
    ///
    /// See [`Extents::try_from_extents`].
    pub fn try_from_mapping<J: IndexType, E: Dims>(
        other: &LayoutRight<J, E>,
    ) -> Result<Self, MappingError> {
        let extents = Extents::try_from_extents(other.extents())?;
        Self::try_new(extents)
    }

    /// Return the stride of each dimension.
    pub fn strides(&self) -> D::Array<I> {
        let mut strides = D::Array::<I>::default();
        let mut stride = I::ONE;
        for (dim, dim_stride) in strides.as_mut().iter_mut().enumerate().rev() {
            *dim_stride = stride;
            stride = stride * self.extents.extent(dim);
        }
        strides
    }

    /// Return the index which maps to `offset`, or `None` if `offset` is
    /// outside `[0, required_span_size())`.
    pub fn index_of(&self, offset: I) -> Option<D::Array<I>> {
        (offset >= I::ZERO && offset < self.required_span_size()).then(|| self.unravel(offset))
    }

    fn unravel(&self, offset: I) -> D::Array<I> {
        let mut index = D::Array::<I>::default();
        let mut rem = offset;
        for (dim, idx) in index.as_mut().iter_mut().enumerate().rev() {
            let size = self.extents.extent(dim);
            *idx = rem % size;
            rem = rem / size;
        }
        index
    }

    /// Return an iterator over all valid indices, in order of increasing
    /// offset.
    pub fn indices(&self) -> Indices<I, D> {
        self.extents.indices()
    }

    /// Return a parallel iterator over all valid indices, in order of
    /// increasing offset.
    ///
    /// The `n`th item is the index whose offset is `n`.
    pub fn par_indices(&self) -> impl IndexedParallelIterator<Item = D::Array<I>> {
        let mapping = *self;
        (0..self.required_span_size().as_usize())
            .into_par_iter()
            .map(move |offset| mapping.unravel(I::cast_usize(offset)))
    }
}

impl<I: IndexType, D: Dims> Mapping for LayoutRight<I, D> {
    type Index = I;
    type Dims = D;

    const IS_ALWAYS_UNIQUE: bool = true;
    const IS_ALWAYS_EXHAUSTIVE: bool = true;
    const IS_ALWAYS_STRIDED: bool = true;

    #[inline]
    fn extents(&self) -> &Extents<I, D> {
        &self.extents
    }

    fn required_span_size(&self) -> I {
        let mut span = I::ONE;
        for dim in 0..D::RANK {
            let size = self.extents.extent(dim);
            if size == I::ZERO {
                return I::ZERO;
            }
            span = span * size;
        }
        span
    }

    #[inline]
    fn offset_unchecked(&self, index: D::Array<I>) -> I {
        index
            .as_ref()
            .iter()
            .enumerate()
            .fold(I::ZERO, |offset, (dim, &idx)| {
                offset * self.extents.extent(dim) + idx
            })
    }

    fn stride(&self, dim: usize) -> I {
        const {
            assert!(D::RANK > 0, "stride() is not defined for rank 0");
        }
        assert!(
            dim < D::RANK,
            "stride(): dim {} is out of range for rank {}",
            dim,
            D::RANK
        );
        (dim + 1..D::RANK).fold(I::ONE, |stride, d| stride * self.extents.extent(d))
    }
}

/// Return true if the product of the non-zero sizes in `extents` can be
/// represented as `I`.
///
/// Zero sizes are skipped so that the strides of the remaining dimensions
/// are also guaranteed to be representable.
fn span_fits<I: IndexType, D: Dims>(extents: &Extents<I, D>) -> bool {
    let mut product: i128 = 1;
    for dim in 0..D::RANK {
        let size = extents.extent(dim).to_i128();
        if size == 0 {
            continue;
        }
        match product.checked_mul(size) {
            Some(p) if is_representable_as::<I>(p) => product = p,
            _ => return false,
        }
    }
    true
}

/// Compile-time counterpart of [`span_fits`] for the static sizes of a
/// pattern.
const fn static_span_fits(static_extents: &[usize], max: i128) -> bool {
    let mut product: i128 = 1;
    let mut dim = 0;
    while dim < static_extents.len() {
        let size = static_extents[dim];
        if size != DYNAMIC_EXTENT && size != 0 {
            product = match product.checked_mul(size as i128) {
                Some(p) => p,
                None => return false,
            };
            if product > max {
                return false;
            }
        }
        dim += 1;
    }
    true
}

#[inline(always)]
fn check_static_span<I: IndexType, D: Dims>() {
    const {
        assert!(
            static_span_fits(D::STATIC_EXTENTS, I::MAX),
            "product of static extents must be representable as index type"
        );
    }
}

impl<I: IndexType, D: Dims> Clone for LayoutRight<I, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: IndexType, D: Dims> Copy for LayoutRight<I, D> {}

impl<I: IndexType, D: Dims> Default for LayoutRight<I, D> {
    /// Return the mapping of the default extents, where every dynamic size
    /// is zero.
    fn default() -> Self {
        check_static_span::<I, D>();
        LayoutRight {
            extents: Extents::default(),
        }
    }
}

impl<I: IndexType, D: Dims> fmt::Debug for LayoutRight<I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRight")
            .field("extents", &self.extents)
            .finish()
    }
}

impl<I: IndexType, D: Dims> Hash for LayoutRight<I, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.extents.hash(state)
    }
}

impl<I, D, J, E> PartialEq<LayoutRight<J, E>> for LayoutRight<I, D>
where
    I: IndexType,
    D: Dims,
    J: IndexType,
    E: Dims,
{
    /// Mappings are equal if their extents are equal. Comparing mappings of
    /// different rank fails to compile.
    fn eq(&self, other: &LayoutRight<J, E>) -> bool {
        const {
            assert!(D::RANK == E::RANK, "cannot compare mappings of different rank");
        }
        self.extents == other.extents
    }
}

impl<I: IndexType, D: Dims> Eq for LayoutRight<I, D> {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rayon::prelude::*;

    use super::{LayoutRight, Mapping};
    use crate::dims::{Dyn, Fix};
    use crate::errors::{ExtentsError, MappingError};
    use crate::extents::{DExtents, Extents};
    use crate::test_util::{expect_bijective, expect_row_major, expect_strides_consistent};

    #[test]
    fn test_required_span_size() {
        assert_eq!(LayoutRight::new(Extents::<usize, ()>::new([])).required_span_size(), 1);
        assert_eq!(LayoutRight::new(DExtents::<usize, 1>::new([7])).required_span_size(), 7);
        assert_eq!(
            LayoutRight::new(Extents::<usize, (Fix<7>, Fix<8>)>::new([])).required_span_size(),
            56
        );
        assert_eq!(
            LayoutRight::new(Extents::<usize, (Dyn, Fix<8>, Dyn, Dyn)>::new([7, 9, 10]))
                .required_span_size(),
            5040
        );
        assert_eq!(
            LayoutRight::new(Extents::<usize, (Fix<1>, Fix<8>, Dyn, Dyn)>::new([9, 10]))
                .required_span_size(),
            720
        );
        assert_eq!(
            LayoutRight::new(Extents::<usize, (Fix<1>, Fix<0>, Dyn, Dyn)>::new([9, 10]))
                .required_span_size(),
            0
        );
    }

    #[test]
    fn test_strides() {
        let mapping = LayoutRight::new(Extents::<i32, (Dyn, Fix<8>, Dyn, Dyn)>::new([7, 9, 10]));
        assert_eq!(mapping.strides(), [720, 90, 10, 1]);
        for (dim, stride) in [720, 90, 10, 1].into_iter().enumerate() {
            assert_eq!(mapping.stride(dim), stride);
        }

        let empty = LayoutRight::new(Extents::<u8, (Fix<1>, Fix<0>, Dyn, Dyn)>::new([9, 10]));
        assert_eq!(empty.strides(), [0, 90, 10, 1]);
        assert_eq!(empty.stride(0), 0);
    }

    #[test]
    #[should_panic(expected = "stride(): dim 2 is out of range for rank 2")]
    fn test_stride_invalid_dim() {
        let mapping = LayoutRight::new(DExtents::<u32, 2>::new([3, 4]));
        mapping.stride(2);
    }

    #[test]
    fn test_offset() {
        struct Case {
            index: [i64; 4],
            offset: i64,
        }

        let cases = [
            Case {
                index: [0, 0, 0, 0],
                offset: 0,
            },
            Case {
                index: [0, 0, 0, 9],
                offset: 9,
            },
            Case {
                index: [0, 0, 1, 0],
                offset: 10,
            },
            Case {
                index: [1, 2, 3, 4],
                offset: 720 + 2 * 90 + 3 * 10 + 4,
            },
            Case {
                index: [6, 7, 8, 9],
                offset: 5039,
            },
        ];

        let mapping = LayoutRight::new(Extents::<i64, (Dyn, Fix<8>, Dyn, Dyn)>::new([7, 9, 10]));
        for Case { index, offset } in cases {
            assert_eq!(mapping.offset(index), offset);
            assert_eq!(mapping.try_offset(index), Some(offset));
            assert_eq!(mapping.offset_unchecked(index), offset);
        }
    }

    #[test]
    fn test_offset_scalar() {
        let mapping = LayoutRight::new(Extents::<u8, ()>::new([]));
        assert_eq!(mapping.required_span_size(), 1);
        assert_eq!(mapping.offset([]), 0);
        assert_eq!(mapping.index_of(0), Some([]));
        assert_eq!(mapping.index_of(1), None);
    }

    #[test]
    fn test_offsets_are_row_major() {
        let mapping = LayoutRight::new(Extents::<u16, (Dyn, Fix<3>, Dyn)>::new([4, 5]));
        for (expected, index) in mapping.indices().enumerate() {
            assert_eq!(mapping.offset(index) as usize, expected);
        }
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "checked-index"))]
    #[should_panic(expected = "index [5] out of bounds for Extents([5])")]
    fn test_offset_out_of_bounds() {
        let mapping = LayoutRight::new(Extents::<u8, (Fix<5>,)>::new([]));
        mapping.offset([5]);
    }

    #[test]
    fn test_try_offset_out_of_bounds() {
        let mapping = LayoutRight::new(DExtents::<i32, 2>::new([3, 4]));
        assert_eq!(mapping.try_offset([3, 0]), None);
        assert_eq!(mapping.try_offset([0, 4]), None);
        assert_eq!(mapping.try_offset([-1, 0]), None);
        assert_eq!(mapping.try_offset([2, 3]), Some(11));
    }

    #[test]
    fn test_span_too_large() {
        struct Case {
            shape: [u8; 3],
            result: Result<u8, MappingError>,
        }

        let cases = [
            Case {
                shape: [15, 17, 1],
                result: Ok(255),
            },
            Case {
                shape: [16, 16, 1],
                result: Err(MappingError::SpanTooLarge),
            },
            // Zero sizes do not hide an overflow in the other dimensions.
            Case {
                shape: [16, 0, 16],
                result: Err(MappingError::SpanTooLarge),
            },
            Case {
                shape: [0, 255, 1],
                result: Ok(0),
            },
        ];

        for Case { shape, result } in cases {
            let mapping = LayoutRight::try_new(DExtents::<u8, 3>::new(shape));
            assert_eq!(mapping.map(|m| m.required_span_size()), result);
        }
    }

    #[test]
    #[should_panic(expected = "product of extents must be representable as index type")]
    fn test_new_span_too_large() {
        LayoutRight::new(Extents::<i8, (Dyn, Fix<2>)>::new([64]));
    }

    #[test]
    fn test_eq() {
        let a = LayoutRight::new(Extents::<i32, (Dyn, Fix<8>)>::new([7]));
        let b = LayoutRight::new(Extents::<u64, (Fix<7>, Dyn)>::new([8]));
        let c = LayoutRight::new(DExtents::<usize, 2>::new([7, 9]));

        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
        assert_eq!(
            LayoutRight::new(Extents::<u8, ()>::new([])),
            LayoutRight::new(Extents::<i64, ()>::new([]))
        );
    }

    #[test]
    fn test_flags() {
        let mapping = LayoutRight::new(DExtents::<u32, 2>::new([3, 4]));
        assert!(mapping.is_unique());
        assert!(mapping.is_exhaustive());
        assert!(mapping.is_strided());

        const UNIQUE: bool = <LayoutRight<u8, ()> as Mapping>::IS_ALWAYS_UNIQUE;
        const EXHAUSTIVE: bool = <LayoutRight<u8, ()> as Mapping>::IS_ALWAYS_EXHAUSTIVE;
        const STRIDED: bool = <LayoutRight<u8, ()> as Mapping>::IS_ALWAYS_STRIDED;
        assert!(UNIQUE && EXHAUSTIVE && STRIDED);
    }

    #[test]
    fn test_conversion_round_trip() {
        let narrow = LayoutRight::new(Extents::<u32, (Dyn, Fix<4>, Dyn)>::new([3, 5]));
        let wide = LayoutRight::<u64, (Dyn, Dyn, Dyn)>::from_mapping(&narrow);
        assert_eq!(wide, narrow);
        assert_eq!(wide.required_span_size(), 60);

        let back = LayoutRight::<u32, (Dyn, Fix<4>, Dyn)>::try_from_mapping(&wide).unwrap();
        assert_eq!(back.required_span_size(), narrow.required_span_size());
        for index in narrow.indices() {
            let wide_index = index.map(u64::from);
            assert_eq!(wide.offset(wide_index), narrow.offset(index) as u64);
            assert_eq!(back.offset(index), narrow.offset(index));
        }
    }

    #[test]
    fn test_try_from_mapping_errors() {
        let src = LayoutRight::new(DExtents::<u32, 2>::new([20, 20]));

        // Each size fits, but the span does not.
        assert_eq!(
            LayoutRight::<u8, (Dyn, Dyn)>::try_from_mapping(&src),
            Err(MappingError::SpanTooLarge)
        );

        let src = LayoutRight::new(DExtents::<u32, 2>::new([2, 300]));
        assert_eq!(
            LayoutRight::<u8, (Dyn, Dyn)>::try_from_mapping(&src),
            Err(MappingError::Extents(ExtentsError::NotRepresentable { dim: 1 }))
        );
        assert_eq!(
            LayoutRight::<u32, (Fix<3>, Dyn)>::try_from_mapping(&src),
            Err(MappingError::Extents(ExtentsError::StaticMismatch {
                dim: 0,
                expected: 3,
                actual: 2
            }))
        );
    }

    #[test]
    fn test_index_of() {
        let mapping = LayoutRight::new(Extents::<i32, (Dyn, Fix<3>)>::new([2]));
        assert_eq!(mapping.index_of(0), Some([0, 0]));
        assert_eq!(mapping.index_of(4), Some([1, 1]));
        assert_eq!(mapping.index_of(5), Some([1, 2]));
        assert_eq!(mapping.index_of(6), None);
        assert_eq!(mapping.index_of(-1), None);

        let empty = LayoutRight::new(DExtents::<i32, 2>::new([0, 3]));
        assert_eq!(empty.index_of(0), None);
    }

    #[test]
    fn test_par_indices() {
        let mapping = LayoutRight::new(Extents::<usize, (Dyn, Fix<3>, Dyn)>::new([5, 7]));
        let indices: Vec<_> = mapping.par_indices().collect();
        let expected: Vec<_> = mapping.indices().collect();
        assert_eq!(indices, expected);
        assert!(mapping
            .par_indices()
            .enumerate()
            .all(|(offset, index)| mapping.offset(index) == offset));

        let empty = LayoutRight::new(DExtents::<usize, 2>::new([0, 3]));
        assert_eq!(empty.par_indices().count(), 0);
    }

    #[test]
    fn test_default() {
        let mapping = LayoutRight::<u16, (Dyn, Fix<4>)>::default();
        assert_eq!(mapping.extents().shape(), [0, 4]);
        assert_eq!(mapping.required_span_size(), 0);
    }

    #[test]
    fn test_hash() {
        let mut set = HashSet::new();
        set.insert(LayoutRight::new(DExtents::<u32, 2>::new([3, 4])));
        set.insert(LayoutRight::new(DExtents::<u32, 2>::new([3, 4])));
        set.insert(LayoutRight::new(DExtents::<u32, 2>::new([4, 3])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_mapping_properties() {
        let mappings = [
            LayoutRight::new(DExtents::<u32, 3>::new([1, 1, 1])),
            LayoutRight::new(DExtents::<u32, 3>::new([2, 3, 4])),
            LayoutRight::new(DExtents::<u32, 3>::new([5, 1, 7])),
            LayoutRight::new(DExtents::<u32, 3>::new([0, 3, 4])),
        ];
        for mapping in mappings {
            expect_bijective(&mapping).unwrap();
            expect_strides_consistent(&mapping).unwrap();
            expect_row_major(&mapping).unwrap();
        }
    }

    #[test]
    fn test_mapping_properties_random() {
        let mut rng = fastrand::Rng::with_seed(1234);
        for _ in 0..50 {
            let sizes = [rng.u16(0..6), rng.u16(1..6), rng.u16(0..6), rng.u16(1..4)];
            let mapping = LayoutRight::new(Extents::<u16, (Dyn, Dyn, Dyn, Dyn)>::new(sizes));
            expect_bijective(&mapping).unwrap();
            expect_strides_consistent(&mapping).unwrap();
            expect_row_major(&mapping).unwrap();
        }
    }
}
