//! Snapshot aggregation for snapfold.
//!
//! Turns a [`RawSnapshot`](snapfold_types::RawSnapshot)'s flat object list into a
//! [`SnapshotInfo`]: objects grouped by native type name, per-type and overall
//! byte/object totals, groups ranked by descending byte total and members by
//! descending size.

mod info;
pub mod managed;

pub use info::{AggregateError, SnapshotInfo, TypeGroup};
pub use managed::{ManagedTypeRecord, flatten};
