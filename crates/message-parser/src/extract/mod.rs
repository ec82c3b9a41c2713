//! Token extraction.
//!
//! Scans a message for emoji, native emotes, badges and third-party
//! vocabulary words, allocating one placeholder per token in discovery order
//! and queueing any image that is not cached yet.

mod badges;
mod emoji;
mod native;
mod vocabulary;

pub use badges::parse_badge_field;
pub use native::{NativeEmote, parse_emote_field};
pub use vocabulary::{Cheer, parse_cheer};

use crate::collab::{Collaborators, ImageRequest};
use crate::message::{ChatMessage, PlatformPayload};
use crate::ordering;
use crate::token::{PlaceholderAllocator, Token, TokenClass};

const ACTION_PREFIX: &str = "\u{1}ACTION";
/// `\x01ACTION ` is dropped from the front of an action message.
const ACTION_PREFIX_CHARS: usize = 8;

/// Result of scanning one message.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Message text with any action framing removed.
    pub text: String,
    /// `text` with every detected emoji replaced by a single space.
    pub emoji_stripped: String,
    pub is_action: bool,
    /// Emoji (longest first), then native emotes, then vocabulary words.
    pub emotes: Vec<Token>,
    /// Badge tokens in discovery order.
    pub badges: Vec<Token>,
}

/// Extract tokens with a fresh placeholder range.
pub fn extract(message: &ChatMessage, collab: &Collaborators) -> Extraction {
    extract_with(message, collab, PlaceholderAllocator::new())
}

/// Extract tokens drawing placeholders from `allocator`.
pub fn extract_with(
    message: &ChatMessage,
    collab: &Collaborators,
    allocator: PlaceholderAllocator,
) -> Extraction {
    let mut ex = Extractor {
        collab,
        allocator,
        message_id: &message.id,
        exhausted: false,
    };

    let (text, is_action) = match &message.payload {
        PlatformPayload::Twitch { .. } => strip_action(&message.text),
        PlatformPayload::YouTube { .. } => (message.text.clone(), false),
    };

    let (mut emotes, emoji_stripped) = emoji::scan(&mut ex, &text);
    ordering::sort_emoji(&mut emotes);

    let mut badge_tokens = Vec::new();
    match &message.payload {
        PlatformPayload::Twitch {
            emotes: emote_field,
            badges: badge_field,
            bits,
        } => {
            emotes.extend(native::scan(&mut ex, emote_field, &emoji_stripped));
            badge_tokens.extend(badges::scan(&mut ex, badge_field));
            emotes.extend(vocabulary::scan(&mut ex, &text, *bits));
        }
        PlatformPayload::YouTube { profile_image_url } => {
            if !profile_image_url.is_empty() {
                badge_tokens.extend(ex.token(
                    String::new(),
                    profile_image_url.clone(),
                    TokenClass::ProfileImage,
                    true,
                ));
            }
        }
    }

    Extraction {
        text,
        emoji_stripped,
        is_action,
        emotes,
        badges: badge_tokens,
    }
}

/// Split `/me` framing off a Twitch message.
///
/// Returns the visible text and whether the message was an action.
pub fn strip_action(text: &str) -> (String, bool) {
    if !text.starts_with(ACTION_PREFIX) {
        return (text.to_string(), false);
    }
    let body = text
        .trim_end_matches('\u{1}')
        .chars()
        .skip(ACTION_PREFIX_CHARS)
        .collect();
    (body, true)
}

/// Per-message extraction state.
pub(crate) struct Extractor<'a> {
    collab: &'a Collaborators,
    allocator: PlaceholderAllocator,
    message_id: &'a str,
    exhausted: bool,
}

impl Extractor<'_> {
    /// Build a token and make sure its image gets fetched.
    ///
    /// Returns `None` once the placeholder range is used up; the text the
    /// token would have replaced is then left as is.
    fn token(
        &mut self,
        text: String,
        image_key: String,
        class: TokenClass,
        direct: bool,
    ) -> Option<Token> {
        let placeholder = match self.allocator.allocate() {
            Ok(placeholder) => placeholder,
            Err(e) => {
                if !self.exhausted {
                    tracing::warn!(
                        message_id = self.message_id,
                        image_key = %image_key,
                        "Dropping remaining tokens: {e}"
                    );
                    self.exhausted = true;
                }
                return None;
            }
        };

        let images = &self.collab.images;
        if !images.has_cached(&image_key) {
            images.enqueue(ImageRequest {
                key: image_key.clone(),
                class,
                owner_id: self.message_id.to_string(),
                direct,
            });
        }

        Some(Token {
            placeholder,
            text,
            spacing: images.spacing_for(&image_key),
            image_key,
            class,
        })
    }
}
