//! # Error Broadcast
//!
//! Fans failures out to any number of independent subscribers.
//!
//! Each subscriber owns an unbounded queue, so a slow observer never loses errors and
//! never blocks the publisher or other observers. A subscription only sees errors
//! published after it was created. Cancelling or dropping it unregisters its queue
//! without touching any other subscriber.
use super::error::CallError;
use futures_util::Stream;
use std::{
    collections::HashMap,
    pin::Pin,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicU64, Ordering},
    },
    task::{Context, Poll},
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::trace;

#[derive(Debug, Default)]
struct Registry {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<u64, mpsc::UnboundedSender<CallError>>>,
}

impl Registry {
    fn subscribers(&self) -> MutexGuard<'_, HashMap<u64, mpsc::UnboundedSender<CallError>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: u64) {
        if self.subscribers().remove(&id).is_some() {
            trace!(subscription = id, "Removed error subscriber");
        }
    }
}

/// A multi-subscriber broadcast of [`CallError`]s.
///
/// Clones share the same set of subscribers. Once the last clone is dropped, every
/// subscription stream ends after yielding what it already received.
#[derive(Debug, Clone, Default)]
pub struct ErrorBroadcast {
    registry: Arc<Registry>,
}

impl ErrorBroadcast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&self) -> ErrorSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry.subscribers().insert(id, tx);
        trace!(subscription = id, "Added error subscriber");

        ErrorSubscription {
            id,
            registry: Arc::downgrade(&self.registry),
            stream: UnboundedReceiverStream::new(rx),
        }
    }

    /// Delivers `error` to every live subscriber.
    pub fn publish(&self, error: CallError) {
        self.registry
            .subscribers()
            .retain(|_, tx| tx.send(error.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers().len()
    }
}

/// A lazy stream of the errors published after [`ErrorBroadcast::subscribe`].
#[derive(Debug)]
pub struct ErrorSubscription {
    id: u64,
    registry: Weak<Registry>,
    stream: UnboundedReceiverStream<CallError>,
}

impl ErrorSubscription {
    /// Stops receiving new errors. Errors that were already delivered can still be read.
    ///
    /// Calling this more than once has no further effect.
    pub fn cancel(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
        self.stream.close();
    }
}

impl Stream for ErrorSubscription {
    type Item = CallError;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}

impl Drop for ErrorSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}
