//! Error types for value conversion.

use thiserror::Error;

/// Errors raised when a `Value` cannot be turned into a concrete Rust type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("cannot convert {actual} to {expected}")]
    Incompatible {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("value {value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("list element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    pub fn incompatible(expected: &'static str, actual: &'static str) -> Self {
        Self::Incompatible { expected, actual }
    }

    pub fn out_of_range(value: impl Into<String>, target: &'static str) -> Self {
        Self::OutOfRange {
            value: value.into(),
            target,
        }
    }

    pub fn element(index: usize, source: ConversionError) -> Self {
        Self::Element {
            index,
            source: Box::new(source),
        }
    }
}

/// Result type for value conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;
