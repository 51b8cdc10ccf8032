//! One-shot snapshot delivery.
//!
//! A capture request hands back a [`SnapshotTicket`] that resolves exactly
//! once. The producing side holds a [`SnapshotDelivery`], which is consumed by
//! [`SnapshotDelivery::deliver`], so a second delivery cannot be expressed.

use snapfold_types::RawSnapshot;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Something that can produce raw snapshots on request.
pub trait SnapshotSource {
    /// Fire-and-forget request; the snapshot arrives through the ticket.
    fn request_snapshot(&mut self) -> SnapshotTicket;
}

pub fn snapshot_channel() -> (SnapshotDelivery, SnapshotTicket) {
    let (tx, rx) = oneshot::channel();
    (SnapshotDelivery { tx }, SnapshotTicket { rx })
}

pub struct SnapshotDelivery {
    tx: oneshot::Sender<RawSnapshot>,
}

impl SnapshotDelivery {
    /// Hands the snapshot back if the requester already went away.
    pub fn deliver(self, snapshot: RawSnapshot) -> Result<(), RawSnapshot> {
        self.tx.send(snapshot)
    }

    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
pub enum TicketPoll {
    Pending,
    Ready(RawSnapshot),
    /// The source dropped its delivery without sending.
    Closed,
}

pub struct SnapshotTicket {
    rx: oneshot::Receiver<RawSnapshot>,
}

impl SnapshotTicket {
    /// Non-blocking check, for hosts that poll once per frame.
    pub fn try_take(&mut self) -> TicketPoll {
        match self.rx.try_recv() {
            Ok(snapshot) => TicketPoll::Ready(snapshot),
            Err(TryRecvError::Empty) => TicketPoll::Pending,
            Err(TryRecvError::Closed) => TicketPoll::Closed,
        }
    }

    /// Resolves with the snapshot, or `None` if the source gave up.
    pub async fn wait(self) -> Option<RawSnapshot> {
        self.rx.await.ok()
    }
}
