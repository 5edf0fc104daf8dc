//! mdlayout describes multi-dimensional index spaces and maps indices in
//! them to offsets in linear storage.
//!
//! The two main types are:
//!
//! - [`Extents`], the shape of an index space. Each dimension's size is either
//!   fixed in the type ([`Fix<N>`]) or supplied at runtime ([`Dyn`]).
//! - [`LayoutRight`], a row-major [`Mapping`] from indices to offsets, where
//!   the last dimension varies fastest.
//!
//! Mappings validate on construction that every offset they can produce is
//! representable by their index type. For domains where every dimension is
//! static, this is checked at compile time.
//!
//! # Example
//!
//! ```
//! use mdlayout::{DefaultAccessor, Dyn, Extents, Fix, LayoutRight, Mapping};
//!
//! let extents = Extents::<i64, (Dyn, Fix<8>, Dyn, Dyn)>::new([7, 9, 10]);
//! let mapping = LayoutRight::new(extents);
//!
//! assert_eq!(mapping.required_span_size(), 5040);
//! assert_eq!(mapping.strides(), [720, 90, 10, 1]);
//! assert_eq!(mapping.offset([1, 2, 3, 4]), 934);
//!
//! let data: Vec<f32> = (0..5040).map(|x| x as f32).collect();
//! let accessor = DefaultAccessor::<f32>::new();
//! assert_eq!(*accessor.access(&data, mapping.offset([0, 0, 1, 0])), 10.0);
//! ```
//!
//! # Features
//!
//! - `serde` adds serialization of [`Extents`] and [`LayoutRight`].
//! - `checked-index` keeps the bounds check in [`Mapping::offset`] in release
//!   builds. Without it the check only runs when debug assertions are
//!   enabled.

mod accessor;
mod dims;
mod extents;
mod index;
mod index_iterator;
mod layout;

#[cfg(feature = "serde")]
mod impl_serialize;

pub mod errors;

pub use accessor::DefaultAccessor;
pub use dims::{AllDynamic, Dim, Dims, Dyn, Fix, Rank, DYNAMIC_EXTENT};
pub use extents::{DExtents, Extents};
pub use index::{is_representable_as, IndexType};
pub use index_iterator::Indices;
pub use layout::{LayoutRight, Mapping};

/// This module provides a convenient way to import the most common traits
/// from this library via a glob import.
pub mod prelude {
    pub use super::{IndexType, Mapping};
}

#[doc(hidden)]
pub mod test_util;
