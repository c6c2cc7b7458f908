//! ValidationContext - registered rules per member.
//!
//! At most one rule per mutual-exclusion family is active on a member. When a
//! new rule conflicts with registered ones, the new rule wins and the older
//! ones are evicted.

use crate::outcome::VerificationResult;
use crate::rules::MemberRules;
use crate::tokens::RuleToken;
use prism_core::Value;
use prism_registry::MemberDescriptor;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Rules registered for the members of one session.
#[derive(Default)]
pub struct ValidationContext {
    rules: BTreeMap<String, Vec<Box<dyn RuleToken>>>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Registration ====================

    /// Register a rule. Returns the number of conflicting rules it evicted.
    pub fn register<R: RuleToken + 'static>(&mut self, token: R) -> usize {
        self.register_boxed(Box::new(token))
    }

    /// Register an already boxed rule.
    pub fn register_boxed(&mut self, token: Box<dyn RuleToken>) -> usize {
        let rules = self.rules.entry(token.member().to_string()).or_default();
        let before = rules.len();
        rules.retain(|existing| !token.conflicts_with(existing.as_ref()));
        let evicted = before - rules.len();

        if evicted > 0 {
            debug!(
                member = token.member(),
                rule = token.name(),
                evicted,
                "rule replaced conflicting rules"
            );
        }
        rules.push(token);
        evicted
    }

    /// Start fluent registration for one member.
    pub fn for_member(&mut self, descriptor: &MemberDescriptor) -> MemberRules<'_> {
        MemberRules::new(self, &descriptor.name, descriptor.declared_type)
    }

    /// Remove every rule of a member. Returns how many were removed.
    pub fn clear_member(&mut self, member: &str) -> usize {
        self.rules.remove(member).map_or(0, |rules| rules.len())
    }

    // ==================== Queries ====================

    /// Active rules of a member, in registration order.
    pub fn rules_for(&self, member: &str) -> &[Box<dyn RuleToken>] {
        self.rules.get(member).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a member has at least one active rule.
    pub fn has_rules(&self, member: &str) -> bool {
        !self.rules_for(member).is_empty()
    }

    /// Total number of active rules.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Members with at least one active rule, in name order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|(_, rules)| !rules.is_empty())
            .map(|(name, _)| name.as_str())
    }

    // ==================== Evaluation ====================

    /// Evaluate every rule of one member against a candidate value.
    ///
    /// A member without rules yields an empty, successful result.
    pub fn verify_one(&self, member: &str, value: &Value) -> VerificationResult {
        let mut result = VerificationResult::new();
        for token in self.rules_for(member) {
            result.record(token.verify(value));
        }
        trace!(member, success = result.is_success(), "verified member");
        result
    }

    /// Evaluate several candidate values.
    pub fn verify_many<'a, I>(&self, entries: I) -> VerificationResult
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut result = VerificationResult::new();
        for (member, value) in entries {
            result.merge(self.verify_one(member, value));
        }
        result
    }

    /// Evaluate every member with rules, reading current values through `read`.
    ///
    /// The first read error aborts evaluation.
    pub fn verify_with<E, F>(&self, mut read: F) -> Result<VerificationResult, E>
    where
        F: FnMut(&str) -> Result<Value, E>,
    {
        let mut result = VerificationResult::new();
        for member in self.members() {
            let value = read(member)?;
            result.merge(self.verify_one(member, &value));
        }
        Ok(result)
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (member, rules) in &self.rules {
            let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
            map.entry(member, &names);
        }
        map.finish()
    }
}
