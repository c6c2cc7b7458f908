//! Prism Journal
//!
//! Ordered history of accepted member assignments.
//!
//! Responsibilities:
//! - Append one record per accepted assignment, in order
//! - Fold the history into a name-to-value map
//! - Replay the history onto any target that accepts assignments

mod error;
mod log;
mod record;

pub use error::{JournalError, JournalResult};
pub use log::{HistoryLog, ReplayStats, ReplayTarget};
pub use record::{OperationRecord, Seq};
