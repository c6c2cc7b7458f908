//! Range rule.

use super::RuleToken;
use crate::outcome::VerifyOutcome;
use prism_core::Value;
use std::cmp::Ordering;

/// Whether the bounds of a range are part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeOptions {
    /// Bounds excluded: `from < v < to`.
    OpenInterval,
    /// Bounds included: `from <= v <= to`.
    #[default]
    CloseInterval,
}

/// Requires an orderable value between two bounds.
#[derive(Debug, Clone)]
pub struct RangeToken {
    member: String,
    from: Value,
    to: Value,
    options: RangeOptions,
}

impl RangeToken {
    pub const NAME: &'static str = "Range";

    pub fn new(
        member: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
        options: RangeOptions,
    ) -> Self {
        Self {
            member: member.into(),
            from: from.into(),
            to: to.into(),
            options,
        }
    }

    fn out_of_range(&self, value: &Value) -> VerifyOutcome {
        VerifyOutcome::failed(
            Self::NAME,
            &self.member,
            value,
            format!(
                "The given value is not in the valid range. The current value is: {}, and the valid range is from {} to {}.",
                value, self.from, self.to
            ),
        )
    }
}

impl RuleToken for RangeToken {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        if value.is_null() {
            return self.out_of_range(value);
        }

        let (lower, upper) = match (value.compare(&self.from), value.compare(&self.to)) {
            (Some(lower), Some(upper)) => (lower, upper),
            _ => {
                return VerifyOutcome::failed(
                    Self::NAME,
                    &self.member,
                    value,
                    "The given value cannot be compared.",
                )
            }
        };

        let inside = match self.options {
            RangeOptions::OpenInterval => lower == Ordering::Greater && upper == Ordering::Less,
            RangeOptions::CloseInterval => lower != Ordering::Less && upper != Ordering::Greater,
        };

        if inside {
            VerifyOutcome::passed(Self::NAME, &self.member, value)
        } else {
            self.out_of_range(value)
        }
    }
}
