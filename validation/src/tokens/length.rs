//! Length rules for text and list members.
//!
//! Only text values and lists have a length. Any other value passes these
//! rules unchecked, with one exception: an absent value on a text member is
//! measured as length 0.

use super::{RuleFamily, RuleToken};
use crate::outcome::VerifyOutcome;
use prism_core::{Value, ValueKind};

/// Measure a value, or `None` when the value has no length.
fn measure(value: &Value, declared_type: ValueKind) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::List(items) => Some(items.len()),
        Value::Null if declared_type.is_text() => Some(0),
        _ => None,
    }
}

/// Requires at least `min` characters or elements.
#[derive(Debug, Clone)]
pub struct MinLengthToken {
    member: String,
    declared_type: ValueKind,
    min: usize,
}

impl MinLengthToken {
    pub const NAME: &'static str = "MinLength";

    pub fn new(member: impl Into<String>, declared_type: ValueKind, min: usize) -> Self {
        Self {
            member: member.into(),
            declared_type,
            min,
        }
    }
}

impl RuleToken for MinLengthToken {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn families(&self) -> &'static [RuleFamily] {
        &[RuleFamily::LengthLower]
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        match measure(value, self.declared_type) {
            Some(len) if len < self.min => VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                format!(
                    "The length should be at least {}, and the current length is {}.",
                    self.min, len
                ),
            ),
            _ => VerifyOutcome::passed(Self::NAME, &self.member, value),
        }
    }
}

/// Requires at most `max` characters or elements.
#[derive(Debug, Clone)]
pub struct MaxLengthToken {
    member: String,
    declared_type: ValueKind,
    max: usize,
}

impl MaxLengthToken {
    pub const NAME: &'static str = "MaxLength";

    pub fn new(member: impl Into<String>, declared_type: ValueKind, max: usize) -> Self {
        Self {
            member: member.into(),
            declared_type,
            max,
        }
    }
}

impl RuleToken for MaxLengthToken {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn families(&self) -> &'static [RuleFamily] {
        &[RuleFamily::LengthUpper]
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        match measure(value, self.declared_type) {
            Some(len) if len > self.max => VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                format!(
                    "The length should be at most {}, and the current length is {}.",
                    self.max, len
                ),
            ),
            _ => VerifyOutcome::passed(Self::NAME, &self.member, value),
        }
    }
}

/// Requires exactly `len` characters or elements.
#[derive(Debug, Clone)]
pub struct LengthToken {
    member: String,
    declared_type: ValueKind,
    len: usize,
}

impl LengthToken {
    pub const NAME: &'static str = "Length";

    pub fn new(member: impl Into<String>, declared_type: ValueKind, len: usize) -> Self {
        Self {
            member: member.into(),
            declared_type,
            len,
        }
    }
}

impl RuleToken for LengthToken {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn families(&self) -> &'static [RuleFamily] {
        &[RuleFamily::LengthLower, RuleFamily::LengthUpper]
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        match measure(value, self.declared_type) {
            Some(len) if len != self.len => VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                format!(
                    "The length should be exactly {}, and the current length is {}.",
                    self.len, len
                ),
            ),
            _ => VerifyOutcome::passed(Self::NAME, &self.member, value),
        }
    }
}
