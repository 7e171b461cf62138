//! Method-level diff between two snapshots of a source tree.
//!
//! Keys present only before are removed, keys present only after are added.
//! Keys in both are modified when their code differs beyond whitespace or
//! their Javadoc text differs. Everything else is unchanged and yields no
//! record.

pub mod changes;
pub mod comparator;

pub use changes::{DiffRecord, DiffResult, DiffStatus, DiffSummary};
pub use comparator::{diff_snapshots, normalize_code};
