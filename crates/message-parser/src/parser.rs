use std::sync::Arc;

use crate::collab::{Collaborators, MessageSink};
use crate::color::SenderColorCache;
use crate::extract::{self, Extraction};
use crate::message::ChatMessage;
use crate::render::{self, Header};
use crate::token::PlaceholderAllocator;

/// Decorates chat messages and hands them to the render queue.
///
/// One parser can serve every chat connection; the only state it mutates is
/// the shared sender color cache.
pub struct MessageParser {
    collab: Collaborators,
    colors: Arc<SenderColorCache>,
    sink: Arc<dyn MessageSink>,
}

impl MessageParser {
    pub fn new(collab: Collaborators, sink: Arc<dyn MessageSink>) -> Self {
        Self {
            collab,
            colors: Arc::new(SenderColorCache::new()),
            sink,
        }
    }

    /// Use an existing color cache, e.g. one shared with another parser.
    pub fn with_color_cache(mut self, colors: Arc<SenderColorCache>) -> Self {
        self.colors = colors;
        self
    }

    pub fn colors(&self) -> &SenderColorCache {
        &self.colors
    }

    /// Decorate `message` and publish it.
    pub fn parse(&self, mut message: ChatMessage) {
        self.decorate(&mut message);
        self.sink.publish(message);
    }

    /// Fill in the display text, color and tokens of `message`.
    pub fn decorate(&self, message: &mut ChatMessage) {
        let extraction = extract::extract(message, &self.collab);
        self.apply(message, extraction);
    }

    /// Like [`decorate`](Self::decorate) with placeholders taken from
    /// `allocator`.
    pub fn decorate_with(&self, message: &mut ChatMessage, allocator: PlaceholderAllocator) {
        let extraction = extract::extract_with(message, &self.collab, allocator);
        self.apply(message, extraction);
    }

    fn apply(&self, message: &mut ChatMessage, extraction: Extraction) {
        let color = self
            .colors
            .color_for(&message.sender.display_name, &message.sender.color);

        let header = Header {
            sender_name: &message.sender.display_name,
            color: &color,
            is_action: extraction.is_action,
        };
        let display_text = render::render(
            &extraction.text,
            &extraction.emotes,
            &extraction.badges,
            &header,
            self.collab.cheermotes.as_ref(),
        );

        tracing::debug!(
            message_id = %message.id,
            emotes = extraction.emotes.len(),
            badges = extraction.badges.len(),
            "Decorated chat message"
        );

        message.display_text = display_text;
        message.display_color = color;
        message.emotes = extraction.emotes;
        message.badges = extraction.badges;
    }
}
