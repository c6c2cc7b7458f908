//! History record types.

use prism_core::Value;

/// Sequence number of a record, unique and increasing within one log.
pub type Seq = u64;

/// One accepted assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// Sequence number.
    pub seq: Seq,
    /// Name of the assigned member.
    pub member: String,
    /// The assigned value.
    pub value: Value,
}

impl OperationRecord {
    pub fn new(seq: Seq, member: impl Into<String>, value: Value) -> Self {
        Self {
            seq,
            member: member.into(),
            value,
        }
    }
}
