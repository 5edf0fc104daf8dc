//! Error types reported when constructing or converting extents and
//! mappings.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that can occur when constructing an [`Extents`](crate::Extents).
#[derive(Clone, Debug, PartialEq)]
pub enum ExtentsError {
    /// The number of sizes supplied matched neither the rank nor the dynamic
    /// rank.
    WrongValueCount { expected: usize, actual: usize },

    /// A size was supplied for a static dimension which does not match the
    /// size fixed in the type.
    StaticMismatch {
        dim: usize,
        expected: usize,
        actual: i128,
    },

    /// A dimension was given a negative size.
    NegativeExtent { dim: usize },

    /// A size cannot be represented by the target index type.
    NotRepresentable { dim: usize },
}

impl Display for ExtentsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtentsError::WrongValueCount { expected, actual } => {
                write!(f, "expected {} extents but got {}", expected, actual)
            }
            ExtentsError::StaticMismatch {
                dim,
                expected,
                actual,
            } => write!(
                f,
                "extent {} of dim {} does not match static extent {}",
                actual, dim, expected
            ),
            ExtentsError::NegativeExtent { dim } => write!(f, "extent of dim {} is negative", dim),
            ExtentsError::NotRepresentable { dim } => {
                write!(f, "extent of dim {} is not representable as index type", dim)
            }
        }
    }
}

impl Error for ExtentsError {}

/// Errors that can occur when constructing a layout mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum MappingError {
    /// The product of the extents is not representable as the index type.
    SpanTooLarge,

    /// The extents of the source mapping could not be converted.
    Extents(ExtentsError),
}

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::SpanTooLarge => write!(
                f,
                "product of extents must be representable as index type"
            ),
            MappingError::Extents(err) => write!(f, "invalid extents: {}", err),
        }
    }
}

impl Error for MappingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MappingError::SpanTooLarge => None,
            MappingError::Extents(err) => Some(err),
        }
    }
}

impl From<ExtentsError> for MappingError {
    fn from(val: ExtentsError) -> Self {
        MappingError::Extents(val)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{ExtentsError, MappingError};

    #[test]
    fn test_mapping_error_source() {
        let err = MappingError::from(ExtentsError::NotRepresentable { dim: 2 });
        assert_eq!(
            err.to_string(),
            "invalid extents: extent of dim 2 is not representable as index type"
        );
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("extent of dim 2 is not representable as index type".to_string())
        );
        assert!(MappingError::SpanTooLarge.source().is_none());
    }
}
