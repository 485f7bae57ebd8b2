// The notification boundary. The ledger reports what happened, delivery is somebody else's job.
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::logic::types::{MatchId, PlayerId};

#[derive(Eq, Hash, PartialEq)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(Serialize, Deserialize)]
pub enum NotificationKind {
    Registered,
    Waitlisted,
    Unregistered,
    Excused,
    Promoted,
}

#[derive(Eq, PartialEq)]
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(Serialize, Deserialize)]
pub struct Notification {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn build(player_id: PlayerId, match_id: MatchId, kind: NotificationKind) -> Self {
        Self { player_id, match_id, kind }
    }
}

// Called after the change is committed, never inside the transaction.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}

// Only logs the event.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            player_id = notification.player_id,
            match_id = notification.match_id,
            kind = ?notification.kind,
            "notification"
        );
    }
}

// Keeps every notification in memory, in order.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    // Hand over everything recorded so far and start again.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(notification);
    }
}
