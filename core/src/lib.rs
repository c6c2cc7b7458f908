//! Prism Core Types
//!
//! This crate provides the foundational types used throughout Prism:
//! - Value types (the Value enum with all scalar and list types)
//! - Declared member kinds (ValueKind) and checked conversions (ValueType)
//! - Attribute maps used for pending construction and batch updates
//! - Common error types

mod error;
mod kind;
mod value;

pub use error::*;
pub use kind::*;
pub use value::*;
