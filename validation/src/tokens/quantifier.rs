//! Collection quantifier rules.
//!
//! `All` is universal and holds on an empty list; `Any` is existential and
//! fails on an empty list.

use super::RuleToken;
use crate::outcome::VerifyOutcome;
use prism_core::{Value, ValueType};
use std::fmt;

type ValuePredicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Requires every element of a list to satisfy a predicate.
pub struct AllToken {
    member: String,
    predicate: ValuePredicate,
}

impl AllToken {
    pub const NAME: &'static str = "All";

    pub fn new<F>(member: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            member: member.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl RuleToken for AllToken {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        let Some(items) = value.as_list() else {
            return VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                format!("The value is not a collection: {}.", value.type_name()),
            );
        };

        if items.iter().all(|item| (self.predicate)(item)) {
            VerifyOutcome::passed(Self::NAME, &self.member, value)
        } else {
            VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                "There is at least one unsatisfied member in the collection.",
            )
        }
    }
}

impl fmt::Debug for AllToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllToken")
            .field("member", &self.member)
            .finish_non_exhaustive()
    }
}

/// Requires at least one element of a typed list to satisfy a predicate.
///
/// The value must be a list whose elements all convert to `V`.
pub struct AnyToken<V> {
    member: String,
    predicate: Box<dyn Fn(&V) -> bool + Send + Sync>,
}

impl<V: ValueType + 'static> AnyToken<V> {
    pub const NAME: &'static str = "Any";

    pub fn new<F>(member: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self {
            member: member.into(),
            predicate: Box::new(predicate),
        }
    }

    fn typed_elements(value: &Value) -> Option<Vec<V>> {
        value
            .as_list()?
            .iter()
            .map(|item| V::from_value(item.clone()).ok())
            .collect()
    }
}

impl<V: ValueType + 'static> RuleToken for AnyToken<V> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn member(&self) -> &str {
        &self.member
    }

    fn verify(&self, value: &Value) -> VerifyOutcome {
        let Some(items) = Self::typed_elements(value) else {
            return VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                format!(
                    "The value is not a collection of {}: {}.",
                    V::kind(),
                    value.type_name()
                ),
            );
        };

        if items.iter().any(|item| (self.predicate)(item)) {
            VerifyOutcome::passed(Self::NAME, &self.member, value)
        } else {
            VerifyOutcome::failed(
                Self::NAME,
                &self.member,
                value,
                "There are no members that meet the condition in the collection.",
            )
        }
    }
}

impl<V> fmt::Debug for AnyToken<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyToken")
            .field("member", &self.member)
            .finish_non_exhaustive()
    }
}
