//! Prism Registry
//!
//! Member metadata for reflected types. A type opts in by implementing
//! [`Reflect`], which registers its members on a [`ShapeBuilder`]. The
//! resulting [`Shape`] is immutable and cached per type by the [`Registry`].

mod builder;
mod error;
mod registry;
mod selector;
mod types;

pub use builder::ShapeBuilder;
pub use error::{AccessError, AccessResult, RegistryError, RegistryResult};
pub use registry::{Reflect, Registry};
pub use selector::MemberSelector;
pub use types::*;
