//! Capture lifecycle and rendering for snapfold.
//!
//! [`ProfilerWindow`] owns the capture state machine: it asks a
//! [`SnapshotSource`] for a snapshot, aggregates whatever the returned
//! [`SnapshotTicket`] resolves to, and keeps the previous aggregate around so
//! each render pass can show deltas. Drawing goes through a [`RenderHost`],
//! an immediate-mode UI supplied by the embedding application.

pub mod format;
mod host;
mod presenter;
mod source;
mod window;

#[cfg(test)]
mod testing;

pub use format::{format_bytes, format_count, humanize_bytes};
pub use host::{GroupStyle, RenderHost, ScrollPosition, Width};
pub use presenter::{NO_NAME, draw_native_objects};
pub use source::{SnapshotDelivery, SnapshotSource, SnapshotTicket, TicketPoll, snapshot_channel};
pub use window::{
    CaptureError, CapturePhase, MANAGED_TYPE_TAB, NATIVE_OBJECTS_TAB, ProfilerWindow, TABS,
    TAKE_SNAPSHOT,
};
