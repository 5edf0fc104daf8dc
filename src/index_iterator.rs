use std::iter::FusedIterator;

use crate::dims::Dims;
use crate::extents::Extents;
use crate::index::IndexType;

/// Iterator over all valid indices of an [`Extents`], in row-major order
/// (the last dimension varies fastest).
///
/// A rank-0 index space yields a single empty index. An index space where any
/// dimension has size zero yields nothing.
pub struct Indices<I: IndexType, D: Dims> {
    shape: D::Array<I>,
    next: Option<D::Array<I>>,

    /// Remaining iteration steps.
    remaining: usize,
}

impl<I: IndexType, D: Dims> Indices<I, D> {
    /// Panics if the number of indices exceeds `usize::MAX`.
    pub(crate) fn from_extents(extents: &Extents<I, D>) -> Self {
        let shape = extents.shape();
        let remaining = shape.as_ref().iter().fold(1usize, |count, &size| {
            count
                .checked_mul(size.as_usize())
                .unwrap_or_else(|| panic!("index count exceeds usize::MAX"))
        });
        Indices {
            shape,
            next: (remaining > 0).then(Default::default),
            remaining,
        }
    }
}

impl<I: IndexType, D: Dims> Iterator for Indices<I, D> {
    type Item = D::Array<I>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        let mut next = current;
        let mut has_next = false;
        for (index, &size) in next.as_mut().iter_mut().zip(self.shape.as_ref()).rev() {
            *index = *index + I::ONE;
            if *index == size {
                *index = I::ZERO;
            } else {
                has_next = true;
                break;
            }
        }

        self.next = has_next.then_some(next);
        self.remaining -= 1;

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<I: IndexType, D: Dims> ExactSizeIterator for Indices<I, D> {}

impl<I: IndexType, D: Dims> FusedIterator for Indices<I, D> {}
