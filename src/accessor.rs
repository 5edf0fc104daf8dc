use std::fmt;
use std::marker::PhantomData;

use crate::index::IndexType;

/// Accessor which turns an offset produced by a [`Mapping`](crate::Mapping)
/// into a reference to an element of a slice.
///
/// All accesses are bounds-checked by the slice.
pub struct DefaultAccessor<T> {
    element: PhantomData<fn() -> T>,
}

impl<T> DefaultAccessor<T> {
    pub fn new() -> Self {
        DefaultAccessor {
            element: PhantomData,
        }
    }

    /// Return the element of `data` at `offset`.
    ///
    /// Panics if `offset` is negative or `offset >= data.len()`.
    #[inline]
    pub fn access<'a, I: IndexType>(&self, data: &'a [T], offset: I) -> &'a T {
        &data[offset.as_usize()]
    }

    /// Mutable variant of [`access`](DefaultAccessor::access).
    #[inline]
    pub fn access_mut<'a, I: IndexType>(&self, data: &'a mut [T], offset: I) -> &'a mut T {
        &mut data[offset.as_usize()]
    }

    /// Return the part of `data` starting at `offset`.
    ///
    /// Panics if `offset` is negative or `offset > data.len()`.
    #[inline]
    pub fn offset<'a, I: IndexType>(&self, data: &'a [T], offset: I) -> &'a [T] {
        &data[offset.as_usize()..]
    }
}

impl<T> Clone for DefaultAccessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DefaultAccessor<T> {}

impl<T> Default for DefaultAccessor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DefaultAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultAccessor")
    }
}

#[cfg(test)]
mod tests {
    use super::DefaultAccessor;
    use crate::dims::{Dyn, Fix};
    use crate::extents::Extents;
    use crate::layout::{LayoutRight, Mapping};

    #[test]
    fn test_access() {
        let mapping = LayoutRight::new(Extents::<u32, (Dyn, Fix<3>)>::new([2]));
        let data: Vec<i32> = (0..6).map(|x| x * 10).collect();
        let accessor = DefaultAccessor::<i32>::new();

        assert_eq!(*accessor.access(&data, mapping.offset([0, 0])), 0);
        assert_eq!(*accessor.access(&data, mapping.offset([1, 1])), 40);
        assert_eq!(accessor.offset(&data, mapping.offset([1, 0])), &[30, 40, 50]);
    }

    #[test]
    fn test_access_mut() {
        let mapping = LayoutRight::new(Extents::<i64, (Fix<2>, Fix<2>)>::new([]));
        let mut data = vec![0u8; mapping.required_span_size() as usize];
        let accessor = DefaultAccessor::<u8>::default();

        for index in mapping.indices() {
            let value = (index[0] * 2 + index[1]) as u8;
            *accessor.access_mut(&mut data, mapping.offset(index)) = value;
        }
        assert_eq!(data, [0, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_access_out_of_bounds() {
        let accessor = DefaultAccessor::<i32>::new();
        accessor.access(&[1, 2, 3], 3usize);
    }

    #[test]
    #[should_panic(expected = "i32 value -1 is not a valid usize")]
    fn test_access_negative_offset() {
        let accessor = DefaultAccessor::<i32>::new();
        accessor.access(&[1, 2, 3], -1i32);
    }
}
