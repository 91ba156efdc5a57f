// SPDX-License-Identifier: LGPL-3.0-only
//! Event system for clipboard state notifications.

use npclip_core::ObjectState;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// Events emitted by the clipboard service, one per successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardEvent {
    /// A new object was registered.
    ObjectAdded { object_id: String, name: String },
    /// An object was removed together with its formats.
    ObjectDeleted { object_id: String },
    /// A format or the progress of an object changed.
    ObjectStateChanged {
        object_id: String,
        /// State after the mutation.
        values: ObjectState,
    },
}

impl ClipboardEvent {
    pub fn object_id(&self) -> &str {
        match self {
            ClipboardEvent::ObjectAdded { object_id, .. }
            | ClipboardEvent::ObjectDeleted { object_id }
            | ClipboardEvent::ObjectStateChanged { object_id, .. } => object_id,
        }
    }
}

/// Receiving half handed out by [`ClipboardEventSender::subscribe`].
pub type ClipboardEventReceiver = mpsc::UnboundedReceiver<ClipboardEvent>;

/// Fans clipboard events out to every live subscriber.
///
/// Each subscriber owns an unbounded queue, so a slow reader never loses
/// events and never holds up the sender. Subscribers whose receiver was
/// dropped are pruned on the next send.
#[derive(Debug, Default)]
pub struct ClipboardEventSender {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ClipboardEvent>>>,
}

impl ClipboardEventSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Only events sent after this call are received.
    pub fn subscribe(&self) -> ClipboardEventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers().push(tx);
        rx
    }

    /// Deliver `event` to every subscriber, returning how many received it.
    pub fn send(&self, event: ClipboardEvent) -> usize {
        let mut subscribers = self.subscribers();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers().len()
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<ClipboardEvent>>> {
        // The list stays consistent even if a holder panicked.
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
