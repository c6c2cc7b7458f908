//! Prism Visitor
//!
//! Name-based member access over instances, future instances and types.
//!
//! Responsibilities:
//! - Read and write members by name, untyped or through typed selectors
//! - Validate writes before applying them in strict mode
//! - Verify the current state against registered rules on demand
//! - Record accepted writes and replay them onto other instances
//!
//! # Example
//!
//! ```
//! use prism_registry::{Reflect, Registry, ShapeBuilder};
//! use prism_validation::RangeOptions;
//! use prism_visitor::{Visitor, VisitorOptions};
//!
//! #[derive(Default)]
//! struct Person {
//!     age: i64,
//! }
//!
//! impl Reflect for Person {
//!     fn describe(shape: ShapeBuilder<Self>) -> ShapeBuilder<Self> {
//!         shape.field("age", |p: &Person| p.age, |p: &mut Person, v| p.age = v)
//!     }
//! }
//!
//! let registry = Registry::new();
//! let mut visitor =
//!     Visitor::for_instance(&registry, Person::default(), VisitorOptions::strict()).unwrap();
//! visitor
//!     .rules("age")
//!     .unwrap()
//!     .range(0i64, 150i64, RangeOptions::CloseInterval);
//!
//! assert!(visitor.set("age", 200i64).is_err());
//! assert!(visitor.set("age", 36i64).is_ok());
//! ```

mod accessor;
mod error;
mod options;
mod repeater;
mod table;
mod visitor;

pub use accessor::Accessor;
pub use error::{VisitorError, VisitorResult};
pub use options::{LoadingMode, TargetKind, VisitorOptions};
pub use repeater::Repeater;
pub use visitor::Visitor;
