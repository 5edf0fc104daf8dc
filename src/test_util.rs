//! Checks of the properties mappings are expected to have, for use in tests.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::accessor::DefaultAccessor;
use crate::dims::Dims;
use crate::index::IndexType;
use crate::layout::Mapping;

/// Error reported when a mapping violates an expected property.
#[derive(Clone, Debug, PartialEq)]
pub enum MappingCheckError {
    /// An index mapped to an offset outside `[0, required_span_size())`.
    OutOfSpan {
        index: Vec<i128>,
        offset: i128,
        span: i128,
    },

    /// Two distinct indices mapped to the same offset.
    Duplicate {
        offset: i128,
        first: Vec<i128>,
        second: Vec<i128>,
    },

    /// No index mapped to an offset within the span.
    Unused { offset: usize },

    /// Incrementing an index in one dimension did not advance the offset by
    /// the stride of that dimension.
    Stride {
        index: Vec<i128>,
        dim: usize,
        expected: i128,
        actual: i128,
    },

    /// An index's offset differs from its position in row-major order.
    NotRowMajor {
        index: Vec<i128>,
        expected: i128,
        actual: i128,
    },
}

impl Display for MappingCheckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfSpan {
                index,
                offset,
                span,
            } => write!(
                f,
                "index {:?} has offset {} outside span {}",
                index, offset, span
            ),
            Self::Duplicate {
                offset,
                first,
                second,
            } => write!(
                f,
                "indices {:?} and {:?} both map to offset {}",
                first, second, offset
            ),
            Self::Unused { offset } => write!(f, "no index maps to offset {}", offset),
            Self::Stride {
                index,
                dim,
                expected,
                actual,
            } => write!(
                f,
                "step in dim {} from index {:?} advanced offset by {} instead of {}",
                dim, index, actual, expected
            ),
            Self::NotRowMajor {
                index,
                expected,
                actual,
            } => write!(
                f,
                "index {:?} has offset {} but expected {}",
                index, actual, expected
            ),
        }
    }
}

impl Error for MappingCheckError {}

fn widen<I: IndexType>(index: &[I]) -> Vec<i128> {
    index.iter().map(|i| i.to_i128()).collect()
}

/// Check that every offset produced by `mapping` lies within its span, and
/// that the mapping is unique and exhaustive if it claims to be.
pub fn expect_bijective<M: Mapping>(mapping: &M) -> Result<(), MappingCheckError> {
    let span = mapping.required_span_size().to_i128();
    let mut visited: Vec<Option<<M::Dims as Dims>::Array<M::Index>>> =
        vec![None; mapping.required_span_size().as_usize()];
    let accessor = DefaultAccessor::new();

    for index in mapping.extents().indices() {
        let offset = mapping.offset(index);
        if offset.to_i128() < 0 || offset.to_i128() >= span {
            return Err(MappingCheckError::OutOfSpan {
                index: widen(index.as_ref()),
                offset: offset.to_i128(),
                span,
            });
        }

        let slot = accessor.access_mut(visited.as_mut_slice(), offset);
        if let Some(prev) = *slot {
            if mapping.is_unique() {
                return Err(MappingCheckError::Duplicate {
                    offset: offset.to_i128(),
                    first: widen(prev.as_ref()),
                    second: widen(index.as_ref()),
                });
            }
        }
        *slot = Some(index);
    }

    if mapping.is_exhaustive() {
        if let Some(offset) = visited.iter().position(|slot| slot.is_none()) {
            return Err(MappingCheckError::Unused { offset });
        }
    }

    Ok(())
}

/// Check that incrementing any valid index in dimension `dim`, while staying
/// in bounds, advances the offset by `stride(dim)`.
pub fn expect_strides_consistent<M: Mapping>(mapping: &M) -> Result<(), MappingCheckError> {
    let extents = mapping.extents();
    for index in extents.indices() {
        let offset = mapping.offset(index).to_i128();
        for dim in 0..<M::Dims as Dims>::RANK {
            let one = <M::Index as IndexType>::ONE;
            if index.as_ref()[dim] + one >= extents.extent(dim) {
                continue;
            }
            let mut next = index;
            next.as_mut()[dim] = index.as_ref()[dim] + one;

            let expected = mapping.stride(dim).to_i128();
            let actual = mapping.offset(next).to_i128() - offset;
            if actual != expected {
                return Err(MappingCheckError::Stride {
                    index: widen(index.as_ref()),
                    dim,
                    expected,
                    actual,
                });
            }
        }
    }
    Ok(())
}

/// Check that the `n`th index in row-major order maps to offset `n`.
pub fn expect_row_major<M: Mapping>(mapping: &M) -> Result<(), MappingCheckError> {
    for (n, index) in mapping.extents().indices().enumerate() {
        let actual = mapping.offset(index).to_i128();
        if actual != n as i128 {
            return Err(MappingCheckError::NotRowMajor {
                index: widen(index.as_ref()),
                expected: n as i128,
                actual,
            });
        }
    }
    Ok(())
}
