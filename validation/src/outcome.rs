//! Rule outcome types.

use crate::error::{ValidationError, ValidationResult};
use prism_core::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The result of evaluating one rule against one value.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOutcome {
    /// Name of the rule that produced this outcome.
    pub rule_name: String,
    /// Member the rule is bound to.
    pub member: String,
    /// Whether the value satisfied the rule.
    pub success: bool,
    /// Human-readable message describing a failure.
    pub message: Option<String>,
    /// The value that was evaluated.
    pub evaluated_value: Value,
}

impl VerifyOutcome {
    /// Create a passing outcome.
    pub fn passed(rule_name: impl Into<String>, member: impl Into<String>, value: &Value) -> Self {
        Self {
            rule_name: rule_name.into(),
            member: member.into(),
            success: true,
            message: None,
            evaluated_value: value.clone(),
        }
    }

    /// Create a failing outcome.
    pub fn failed(
        rule_name: impl Into<String>,
        member: impl Into<String>,
        value: &Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            member: member.into(),
            success: false,
            message: Some(message.into()),
            evaluated_value: value.clone(),
        }
    }
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}/{}: {}", self.member, self.rule_name, message),
            None => write!(f, "{}/{}: ok", self.member, self.rule_name),
        }
    }
}

/// Outcomes grouped by member.
///
/// The overall result succeeds iff every outcome of every member succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationResult {
    members: BTreeMap<String, Vec<VerifyOutcome>>,
}

impl VerificationResult {
    /// Create an empty (successful) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an outcome under its member.
    pub fn record(&mut self, outcome: VerifyOutcome) {
        self.members
            .entry(outcome.member.clone())
            .or_default()
            .push(outcome);
    }

    /// Check if every outcome succeeded.
    pub fn is_success(&self) -> bool {
        self.outcomes().all(|o| o.success)
    }

    /// Outcomes recorded for one member.
    pub fn member(&self, name: &str) -> &[VerifyOutcome] {
        self.members.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of evaluated members, in name order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Names of members with at least one failed outcome.
    pub fn failed_members(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|(_, outcomes)| outcomes.iter().any(|o| !o.success))
            .map(|(name, _)| name.as_str())
    }

    /// All outcomes, grouped by member name.
    pub fn outcomes(&self) -> impl Iterator<Item = &VerifyOutcome> {
        self.members.values().flatten()
    }

    /// Failed outcomes only.
    pub fn failures(&self) -> impl Iterator<Item = &VerifyOutcome> {
        self.outcomes().filter(|o| !o.success)
    }

    /// Get the number of outcomes.
    pub fn len(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: VerificationResult) {
        for (name, outcomes) in other.members {
            self.members.entry(name).or_default().extend(outcomes);
        }
    }

    /// Convert a failed result into an aggregate error.
    pub fn raise(self) -> ValidationResult<()> {
        if self.is_success() {
            return Ok(());
        }
        let failures = self
            .members
            .into_values()
            .flatten()
            .filter(|o| !o.success)
            .collect();
        Err(ValidationError::aggregate(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_result_succeeds() {
        let result = VerificationResult::new();
        assert!(result.is_success());
        assert!(result.raise().is_ok());
    }

    #[test]
    fn test_one_failure_fails_the_whole_result() {
        // GIVEN
        let mut result = VerificationResult::new();
        result.record(VerifyOutcome::passed("Range", "age", &Value::Int(3)));
        result.record(VerifyOutcome::failed(
            "MinLength",
            "name",
            &Value::String("a".into()),
            "too short",
        ));

        // THEN
        assert!(!result.is_success());
        assert_eq!(result.len(), 2);
        assert_eq!(result.failed_members().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_raise_keeps_only_failures() {
        // GIVEN
        let mut result = VerificationResult::new();
        result.record(VerifyOutcome::passed("Range", "age", &Value::Int(3)));
        result.record(VerifyOutcome::failed("Required", "name", &Value::Null, "missing"));

        // WHEN
        let err = result.raise().unwrap_err();

        // THEN
        assert_eq!(err.failures().len(), 1);
        assert_eq!(err.failures()[0].member, "name");
        assert_eq!(err.to_string(), "1 validation failure(s): name/Required: missing");
    }

    #[test]
    fn test_merge_appends_per_member() {
        let mut left = VerificationResult::new();
        left.record(VerifyOutcome::passed("Range", "age", &Value::Int(3)));
        let mut right = VerificationResult::new();
        right.record(VerifyOutcome::passed("Required", "age", &Value::Int(3)));

        left.merge(right);

        assert_eq!(left.member("age").len(), 2);
        assert!(left.member("name").is_empty());
    }
}
