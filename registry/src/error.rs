//! Registry and member access error types.

use prism_core::ConversionError;
use thiserror::Error;

/// Errors that can occur while building or resolving a type shape.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate member name: {member} on type {type_name}")]
    DuplicateMember { type_name: String, member: String },

    #[error("Required member is not registered: {member} on type {type_name}")]
    UnknownRequired { type_name: String, member: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Cached shape for {type_name} has an unexpected type")]
    ShapeMismatch { type_name: String },
}

impl RegistryError {
    pub fn duplicate_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::DuplicateMember {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn unknown_required(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::UnknownRequired {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn shape_mismatch(type_name: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            type_name: type_name.into(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised when reading or writing a member through a shape.
///
/// These indicate programmer error rather than bad data, so they are always
/// reported immediately regardless of any validation mode.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Unknown member: {member} on type {type_name}")]
    UnknownMember { type_name: String, member: String },

    #[error("Member is not readable: {member} on type {type_name}")]
    NotReadable { type_name: String, member: String },

    #[error("Member is not writable: {member} on type {type_name}")]
    NotWritable { type_name: String, member: String },

    #[error("Member {member} on type {type_name} needs an instance")]
    InstanceRequired { type_name: String, member: String },

    #[error("Invalid member type: expected {expected}, got {actual} for {member}")]
    TypeMismatch {
        member: String,
        expected: String,
        actual: String,
    },

    #[error("Conversion failed for {member}: {source}")]
    Conversion {
        member: String,
        #[source]
        source: ConversionError,
    },

    #[error("Missing required member: {member} on type {type_name}")]
    MissingRequired { type_name: String, member: String },

    #[error("Type {type_name} has no constructor")]
    NoConstructor { type_name: String },
}

impl AccessError {
    pub fn unknown_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::UnknownMember {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn not_readable(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::NotReadable {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn not_writable(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::NotWritable {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn instance_required(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::InstanceRequired {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn type_mismatch(
        member: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            member: member.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn conversion(member: impl Into<String>, source: ConversionError) -> Self {
        Self::Conversion {
            member: member.into(),
            source,
        }
    }

    pub fn missing_required(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MissingRequired {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn no_constructor(type_name: impl Into<String>) -> Self {
        Self::NoConstructor {
            type_name: type_name.into(),
        }
    }
}

/// Result type for member access.
pub type AccessResult<T> = Result<T, AccessError>;
