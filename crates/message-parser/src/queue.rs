//! Channel-backed image store and message sink.
//!
//! Both hand work to a consumer task over an unbounded tokio channel, so the
//! pipeline never waits on image downloads or rendering.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::collab::{ImageRequest, ImageStore, MessageSink};
use crate::message::ChatMessage;

#[derive(Debug, Default)]
struct ImageState {
    cached: HashSet<String>,
    queued: HashSet<String>,
    spacing: HashMap<String, String>,
}

/// Tracks which images are cached or in flight and forwards new requests.
///
/// A key is forwarded at most once until the consumer reports it cached via
/// [`QueuedImageStore::mark_cached`].
#[derive(Debug)]
pub struct QueuedImageStore {
    state: Mutex<ImageState>,
    tx: mpsc::UnboundedSender<ImageRequest>,
}

impl QueuedImageStore {
    /// Create a store and the receiver its requests are delivered to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ImageRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Self {
            state: Mutex::new(ImageState::default()),
            tx,
        };
        (store, rx)
    }

    /// Record that `key` has been fetched, with the spacing its width needs.
    pub fn mark_cached(&self, key: &str, spacing: impl Into<String>) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.queued.remove(key);
        state.cached.insert(key.to_string());
        state.spacing.insert(key.to_string(), spacing.into());
    }

    /// Number of requests forwarded and not yet marked cached.
    pub fn pending(&self) -> usize {
        self.state.lock().map(|state| state.queued.len()).unwrap_or(0)
    }
}

impl ImageStore for QueuedImageStore {
    fn has_cached(&self, key: &str) -> bool {
        self.state
            .lock()
            .map(|state| state.cached.contains(key))
            .unwrap_or(false)
    }

    fn enqueue(&self, request: ImageRequest) {
        let Ok(mut state) = self.state.lock() else {
            tracing::warn!(key = %request.key, "Image store lock poisoned, dropping request");
            return;
        };
        if state.cached.contains(&request.key) || !state.queued.insert(request.key.clone()) {
            return;
        }
        drop(state);

        if let Err(e) = self.tx.send(request) {
            tracing::debug!(key = %e.0.key, "Image queue closed, request dropped");
        }
    }

    fn spacing_for(&self, key: &str) -> String {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.spacing.get(key).cloned())
            .unwrap_or_default()
    }
}

/// Publishes decorated messages onto a channel for the render loop.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ChatMessage>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChatMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MessageSink for ChannelSink {
    fn publish(&self, message: ChatMessage) {
        if let Err(e) = self.tx.send(message) {
            tracing::warn!(message_id = %e.0.id, "Render queue closed, message dropped");
        }
    }
}
