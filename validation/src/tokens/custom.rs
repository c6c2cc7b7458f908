//! Presence, pattern and caller-defined rules.

use super::RuleToken;
use crate::error::{ValidationError, ValidationResult};
use crate::outcome::VerifyOutcome;
use prism_core::Value;
use regex_lite::Regex;
use std::fmt;

/// Requires a non-null value.
#[derive(Debug, Clone)]
pub struct RequiredToken {
    member: String,
}

impl RequiredToken {
    pub const NAME: &'static str = "Required";

    pub fn new(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
        }
    }
}

impl RuleToken for RequiredToken {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        if value.is_null() {
            VerifyOutcome::failed(Self::NAME, &self.member, value, "The value is required.")
        } else {
            VerifyOutcome::passed(Self::NAME, &self.member, value)
        }
    }
}

/// Requires text matching a regular expression. Null passes.
#[derive(Debug, Clone)]
pub struct PatternToken {
    member: String,
    regex: Regex,
}

impl PatternToken {
    pub const NAME: &'static str = "Pattern";

    /// Compile the pattern; an invalid expression is an argument error.
    pub fn new(member: impl Into<String>, pattern: &str) -> ValidationResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            ValidationError::invalid_argument(format!("invalid pattern {:?}: {}", pattern, e))
        })?;
        Ok(Self {
            member: member.into(),
            regex,
        })
    }
}

impl RuleToken for PatternToken {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        match value {
            Value::Null => VerifyOutcome::passed(Self::NAME, &self.member, value),
            Value::String(s) if self.regex.is_match(s) => {
                VerifyOutcome::passed(Self::NAME, &self.member, value)
            }
            Value::String(_) => VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                format!("The value does not match the pattern {}.", self.regex.as_str()),
            ),
            other => VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                format!("The value is not text: {}.", other.type_name()),
            ),
        }
    }
}

/// A caller-defined predicate with its own name and failure message.
pub struct FuncToken {
    member: String,
    name: String,
    message: String,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl FuncToken {
    pub fn new<F>(
        member: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            member: member.into(),
            name: name.into(),
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl RuleToken for FuncToken {
    fn name(&self) -> &str {
        &self.name
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        if (self.predicate)(value) {
            VerifyOutcome::passed(&self.name, &self.member, value)
        } else {
            VerifyOutcome::failed(&self.name, &self.member, value, &self.message)
        }
    }
}

impl fmt::Debug for FuncToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncToken")
            .field("member", &self.member)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
