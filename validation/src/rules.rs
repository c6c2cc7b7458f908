//! Fluent rule registration for one member.

use crate::context::ValidationContext;
use crate::error::{ValidationError, ValidationResult};
use crate::tokens::{
    AllToken, AnyToken, FuncToken, LengthToken, MaxLengthToken, MinLengthToken, PatternToken,
    RangeOptions, RangeToken, RequiredToken,
};
use prism_core::{Value, ValueKind, ValueType};

/// Registers rules on one member of a [`ValidationContext`].
///
/// ```ignore
/// context
///     .for_member(&descriptor)
///     .required()
///     .min_length(2)?
///     .max_length(40)?;
/// ```
#[derive(Debug)]
pub struct MemberRules<'c> {
    context: &'c mut ValidationContext,
    member: String,
    declared_type: ValueKind,
}

impl<'c> MemberRules<'c> {
    pub(crate) fn new(
        context: &'c mut ValidationContext,
        member: impl Into<String>,
        declared_type: ValueKind,
    ) -> Self {
        Self {
            context,
            member: member.into(),
            declared_type,
        }
    }

    /// Name of the member receiving rules.
    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn range(self, from: impl Into<Value>, to: impl Into<Value>, options: RangeOptions) -> Self {
        let token = RangeToken::new(self.member.clone(), from, to, options);
        self.context.register(token);
        self
    }

    /// Fails with an argument error when `min` is negative.
    pub fn min_length(self, min: i64) -> ValidationResult<Self> {
        let min = non_negative("min_length", min)?;
        let token = MinLengthToken::new(self.member.clone(), self.declared_type, min);
        self.context.register(token);
        Ok(self)
    }

    /// Fails with an argument error when `max` is negative.
    pub fn max_length(self, max: i64) -> ValidationResult<Self> {
        let max = non_negative("max_length", max)?;
        let token = MaxLengthToken::new(self.member.clone(), self.declared_type, max);
        self.context.register(token);
        Ok(self)
    }

    /// Fails with an argument error when `len` is negative.
    pub fn length(self, len: i64) -> ValidationResult<Self> {
        let len = non_negative("length", len)?;
        let token = LengthToken::new(self.member.clone(), self.declared_type, len);
        self.context.register(token);
        Ok(self)
    }

    pub fn all<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.context.register(AllToken::new(self.member.clone(), predicate));
        self
    }

    pub fn any<V, F>(self, predicate: F) -> Self
    where
        V: ValueType + 'static,
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.context
            .register(AnyToken::<V>::new(self.member.clone(), predicate));
        self
    }

    pub fn pattern(self, pattern: &str) -> ValidationResult<Self> {
        let token = PatternToken::new(self.member.clone(), pattern)?;
        self.context.register(token);
        Ok(self)
    }

    pub fn required(self) -> Self {
        self.context.register(RequiredToken::new(self.member.clone()));
        self
    }

    pub fn func<F>(self, name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let token = FuncToken::new(self.member.clone(), name, message, predicate);
        self.context.register(token);
        self
    }
}

fn non_negative(rule: &str, n: i64) -> ValidationResult<usize> {
    usize::try_from(n).map_err(|_| {
        ValidationError::invalid_argument(format!("{} must not be negative, got {}", rule, n))
    })
}
