use std::error::Error;
use std::fmt;

use snapfold_aggregate::{AggregateError, SnapshotInfo, flatten};
use snapfold_types::RawSnapshot;
use tracing::{debug, error, info, warn};

use crate::host::{RenderHost, ScrollPosition};
use crate::presenter::draw_native_objects;
use crate::source::{SnapshotSource, SnapshotTicket, TicketPoll};

pub const TAKE_SNAPSHOT: &str = "Take Snapshot";
pub const TABS: [&str; 2] = ["NativeObjects", "ManagedType"];
pub const NATIVE_OBJECTS_TAB: usize = 0;
pub const MANAGED_TYPE_TAB: usize = 1;

#[derive(Debug)]
pub enum CaptureError {
    /// A capture is already outstanding; the new request was dropped.
    AlreadyPending,
    NoPendingCapture,
    /// The source dropped the request without delivering a snapshot.
    SourceClosed,
    Aggregate(AggregateError),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPending => write!(f, "a snapshot capture is already in flight"),
            Self::NoPendingCapture => write!(f, "no snapshot capture is in flight"),
            Self::SourceClosed => {
                write!(f, "snapshot source closed the request without delivering")
            }
            Self::Aggregate(source) => write!(f, "failed to aggregate snapshot: {source}"),
        }
    }
}

impl Error for CaptureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Aggregate(source) => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Idle,
    AwaitingSnapshot,
    Aggregating,
}

/// Top-level profiler state: the capture lifecycle plus everything a render
/// pass reads (current and last aggregates, scroll, selected tab).
///
/// At most one raw snapshot is held at a time. It is released before every
/// new request and on [`teardown`](Self::teardown).
pub struct ProfilerWindow<S> {
    source: S,
    phase: CapturePhase,
    pending: Option<SnapshotTicket>,
    raw: Option<RawSnapshot>,
    current: Option<SnapshotInfo>,
    last: Option<SnapshotInfo>,
    scroll: ScrollPosition,
    tab: usize,
}

impl<S: SnapshotSource> ProfilerWindow<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: CapturePhase::Idle,
            pending: None,
            raw: None,
            current: None,
            last: None,
            scroll: ScrollPosition::default(),
            tab: NATIVE_OBJECTS_TAB,
        }
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn current(&self) -> Option<&SnapshotInfo> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut SnapshotInfo> {
        self.current.as_mut()
    }

    pub fn last(&self) -> Option<&SnapshotInfo> {
        self.last.as_ref()
    }

    pub fn raw_snapshot(&self) -> Option<&RawSnapshot> {
        self.raw.as_ref()
    }

    pub fn tab(&self) -> usize {
        self.tab
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Starts a capture. Rejected while another one is outstanding.
    pub fn request_capture(&mut self) -> Result<(), CaptureError> {
        if self.pending.is_some() {
            warn!("snapshot capture already in flight; ignoring request");
            return Err(CaptureError::AlreadyPending);
        }
        self.release_snapshot();
        self.pending = Some(self.source.request_snapshot());
        self.phase = CapturePhase::AwaitingSnapshot;
        debug!("requested snapshot");
        Ok(())
    }

    /// Non-blocking; returns `Ok(true)` when a snapshot arrived and was
    /// aggregated during this call.
    pub fn poll_capture(&mut self) -> Result<bool, CaptureError> {
        let Some(ticket) = self.pending.as_mut() else {
            return Ok(false);
        };
        match ticket.try_take() {
            TicketPoll::Pending => Ok(false),
            TicketPoll::Ready(snapshot) => {
                self.pending = None;
                self.complete_capture(snapshot)?;
                Ok(true)
            }
            TicketPoll::Closed => {
                self.pending = None;
                self.phase = CapturePhase::Idle;
                warn!("snapshot source closed without delivering");
                Err(CaptureError::SourceClosed)
            }
        }
    }

    /// Waits for the outstanding capture and aggregates it.
    pub async fn finish_capture(&mut self) -> Result<(), CaptureError> {
        let ticket = self.pending.take().ok_or(CaptureError::NoPendingCapture)?;
        match ticket.wait().await {
            Some(snapshot) => self.complete_capture(snapshot),
            None => {
                self.phase = CapturePhase::Idle;
                warn!("snapshot source closed without delivering");
                Err(CaptureError::SourceClosed)
            }
        }
    }

    fn complete_capture(&mut self, snapshot: RawSnapshot) -> Result<(), CaptureError> {
        self.phase = CapturePhase::Aggregating;
        info!(
            native_objects = snapshot.native_objects.len(),
            native_types = snapshot.native_types.len(),
            "snapshot received"
        );

        let mut next = match SnapshotInfo::from_snapshot(&snapshot) {
            Ok(next) => next,
            Err(e) => {
                error!(%e, "discarding corrupt snapshot");
                self.phase = CapturePhase::Idle;
                return Err(CaptureError::Aggregate(e));
            }
        };

        let managed = flatten(&snapshot.type_descriptions);
        info!(managed_types = managed.len(), "parsed managed types");
        for record in &managed {
            debug!(name = %record.name, size = record.size, "managed type");
        }

        if let Some(previous) = self.current.take() {
            next.inherit_expanded(&previous);
            self.last = Some(previous);
        }
        self.current = Some(next);
        self.raw = Some(snapshot);
        self.phase = CapturePhase::Idle;
        Ok(())
    }

    fn release_snapshot(&mut self) {
        if self.raw.take().is_some() {
            debug!("released raw snapshot");
        }
    }

    /// Releases the raw snapshot and abandons any outstanding request.
    pub fn teardown(&mut self) {
        self.release_snapshot();
        if self.pending.take().is_some() {
            debug!("abandoned in-flight snapshot request");
        }
        self.phase = CapturePhase::Idle;
    }

    /// One render pass.
    pub fn on_gui<H: RenderHost + ?Sized>(&mut self, host: &mut H) {
        if host.button(TAKE_SNAPSHOT) {
            let _ = self.request_capture();
        }

        let Some(current) = self.current.as_mut() else {
            return;
        };

        self.tab = host.toolbar(self.tab, &TABS);
        match self.tab {
            NATIVE_OBJECTS_TAB => {
                draw_native_objects(host, current, self.last.as_ref(), &mut self.scroll)
            }
            MANAGED_TYPE_TAB => {}
            other => error!(tab = other, "undefined tab index"),
        }
    }

    /// Picks up a delivered snapshot, then renders.
    pub fn frame<H: RenderHost + ?Sized>(&mut self, host: &mut H) {
        if let Err(e) = self.poll_capture() {
            debug!(%e, "capture did not complete");
        }
        self.on_gui(host);
    }
}

impl<S> Drop for ProfilerWindow<S> {
    fn drop(&mut self) {
        self.raw = None;
        self.pending = None;
    }
}
