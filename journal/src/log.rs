//! In-memory history log and replay.

use std::collections::BTreeSet;

use prism_core::{Attributes, Value};
use tracing::{debug, trace};

use crate::error::{JournalError, JournalResult};
use crate::record::{OperationRecord, Seq};

/// Something a history can be replayed onto.
pub trait ReplayTarget {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Assign `value` to the member called `name`.
    fn apply(&mut self, name: &str, value: Value) -> Result<(), Self::Error>;
}

/// Append-only log of accepted assignments.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    /// All recorded operations, in order.
    records: Vec<OperationRecord>,
    /// Next sequence number to assign.
    next_seq: Seq,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_seq: 1,
        }
    }

    /// Record an accepted assignment.
    pub fn register_operation(&mut self, member: impl Into<String>, value: Value) -> Seq {
        let seq = self.next_seq;
        self.next_seq += 1;
        let record = OperationRecord::new(seq, member, value);
        trace!(seq, member = %record.member, "recorded operation");
        self.records.push(record);
        seq
    }

    /// Get all records, oldest first.
    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    /// Get a record by sequence number.
    pub fn get(&self, seq: Seq) -> Option<&OperationRecord> {
        self.records.iter().find(|r| r.seq == seq)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names of every member the log assigns.
    pub fn members(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.member.as_str()).collect()
    }

    /// Latest value per member.
    pub fn fold(&self) -> Attributes {
        let mut values = Attributes::new();
        for record in &self.records {
            values.insert(record.member.clone(), record.value.clone());
        }
        values
    }

    /// Apply every record to `target`, in order.
    ///
    /// The log itself is never modified, so replaying twice gives the same
    /// sequence of assignments. The first failing record aborts the replay.
    pub fn replay_onto<R: ReplayTarget>(&self, target: &mut R) -> JournalResult<ReplayStats> {
        let mut stats = ReplayStats::default();

        for record in &self.records {
            target
                .apply(&record.member, record.value.clone())
                .map_err(|e| JournalError::replay(record.seq, &record.member, e))?;
            stats.records_replayed += 1;
        }
        stats.members_touched = self.members().len();

        debug!(
            records = stats.records_replayed,
            members = stats.members_touched,
            "replayed history"
        );
        Ok(stats)
    }
}

/// Statistics from a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Number of records applied.
    pub records_replayed: usize,
    /// Number of distinct members assigned.
    pub members_touched: usize,
}
