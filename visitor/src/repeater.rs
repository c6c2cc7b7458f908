//! Repeater - replays a session's history.

use std::sync::Arc;

use prism_core::{Attributes, Value};
use prism_journal::{HistoryLog, JournalError, ReplayTarget};
use prism_registry::{AccessError, Reflect, Shape};

use crate::error::VisitorResult;
use crate::options::TargetKind;
use crate::visitor::Visitor;

/// Replays the accepted writes of one visitor.
///
/// Sessions that are not repeatable, and static-type sessions, get a
/// repeater whose operations all report `NotSupported`. Callers that treat an
/// unsupported replay as a plain flag should check
/// [`Repeater::is_supported`] before calling `repeat`, `repeat_onto` or
/// `repeat_with`.
pub struct Repeater<'v, 'r, T: Reflect> {
    visitor: &'v mut Visitor<'r, T>,
}

/// Applies records to one live instance through its shape.
struct InstanceTarget<'a, T> {
    shape: &'a Shape<T>,
    instance: &'a mut T,
}

impl<T> ReplayTarget for InstanceTarget<'_, T> {
    type Error = AccessError;

    fn apply(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        self.shape.write(Some(&mut *self.instance), name, value)
    }
}

impl<'v, 'r, T: Reflect> Repeater<'v, 'r, T> {
    pub(crate) fn new(visitor: &'v mut Visitor<'r, T>) -> Self {
        Self { visitor }
    }

    /// Check if this session can replay its history.
    pub fn is_supported(&self) -> bool {
        self.visitor.history.is_some() && self.visitor.target_kind() != TargetKind::StaticType
    }

    fn history(&self) -> Result<&HistoryLog, JournalError> {
        if self.visitor.target_kind() == TargetKind::StaticType {
            return Err(JournalError::not_supported(
                "a static type has no instance to replay onto",
            ));
        }
        self.visitor
            .history
            .as_ref()
            .ok_or_else(|| JournalError::not_supported("the session is not repeatable"))
    }

    /// Replay the history onto the instance bound to the visitor.
    pub fn repeat(&mut self) -> VisitorResult<&T> {
        self.history()?;
        let visitor = &mut *self.visitor;
        let shape = Arc::clone(visitor.accessor.shape());
        let (Some(history), Some(instance)) =
            (visitor.history.as_ref(), visitor.accessor.instance_mut())
        else {
            return Err(JournalError::not_supported(
                "the future instance has not been materialized",
            )
            .into());
        };
        history.replay_onto(&mut InstanceTarget {
            shape: &shape,
            instance,
        })?;

        visitor
            .accessor
            .instance()
            .ok_or_else(|| JournalError::not_supported("no bound instance").into())
    }

    /// Replay the history onto a caller-supplied instance and return it.
    pub fn repeat_onto(&self, mut instance: T) -> VisitorResult<T> {
        let history = self.history()?;
        history.replay_onto(&mut InstanceTarget {
            shape: self.visitor.shape(),
            instance: &mut instance,
        })?;
        Ok(instance)
    }

    /// Build a fresh instance from the history with `overrides` laid on top.
    ///
    /// The latest recorded value of each member is combined with the
    /// overrides, overrides winning, and the result is materialized through
    /// the type's constructor.
    pub fn repeat_with(&self, overrides: Attributes) -> VisitorResult<T> {
        let mut values = self.history()?.fold();
        values.extend(overrides);
        Ok(self.visitor.shape().materialize(values)?)
    }
}
