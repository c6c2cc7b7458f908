//! Rule token implementations.
//!
//! Each token is bound to one member, is immutable once built, and evaluates
//! a value without side effects. Failures are reported as outcomes, never as
//! errors or panics.

mod custom;
mod length;
mod quantifier;
mod range;

pub use custom::{FuncToken, PatternToken, RequiredToken};
pub use length::{LengthToken, MaxLengthToken, MinLengthToken};
pub use quantifier::{AllToken, AnyToken};
pub use range::{RangeOptions, RangeToken};

use crate::outcome::VerifyOutcome;
use prism_core::Value;

/// A group of rule kinds of which at most one may be active per member.
///
/// Two tokens conflict when their family sets intersect. An exact length
/// occupies both length bounds, so it conflicts with a minimum and with a
/// maximum, while a minimum and a maximum can coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
    /// Lower bound on text or list length.
    LengthLower,
    /// Upper bound on text or list length.
    LengthUpper,
}

/// One validation rule bound to a member.
pub trait RuleToken: Send + Sync {
    /// Name reported in outcomes.
    fn name(&self) -> &str;

    /// Name of the member this rule is bound to.
    fn member(&self) -> &str;

    /// Mutual-exclusion families this rule occupies. Empty if it never conflicts.
    fn families(&self) -> &'static [RuleFamily] {
        &[]
    }

    /// Evaluate the rule against a candidate value.
    fn verify(&self, value: &Value) -> VerifyOutcome;

    /// Check if this rule cannot be active together with `other`.
    fn conflicts_with(&self, other: &dyn RuleToken) -> bool {
        self.families()
            .iter()
            .any(|family| other.families().contains(family))
    }
}
