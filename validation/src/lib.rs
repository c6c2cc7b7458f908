//! Prism Validation
//!
//! Declarative per-member rules evaluated against candidate values.
//!
//! Responsibilities:
//! - Hold the rule tokens registered for each member
//! - Keep at most one rule per mutual-exclusion family on a member
//! - Evaluate one, many or all members and aggregate the outcomes
//! - Turn failed reports into an aggregate error on request
//!
//! # Module Structure
//!
//! - `tokens/` - Individual rule implementations (range, length, quantifiers, pattern, custom)
//! - `context` - The ValidationContext that owns registered rules
//! - `rules` - Fluent registration for one member
//! - `outcome` - Per-rule outcomes and whole-object results
//! - `error` - Error types for validation failures

mod context;
mod error;
mod outcome;
mod rules;
mod tokens;

pub use context::ValidationContext;
pub use error::{ValidationError, ValidationResult};
pub use outcome::{VerificationResult, VerifyOutcome};
pub use rules::MemberRules;
pub use tokens::{
    AllToken, AnyToken, FuncToken, LengthToken, MaxLengthToken, MinLengthToken, PatternToken,
    RangeOptions, RangeToken, RequiredToken, RuleFamily, RuleToken,
};
