//! Interfaces to the systems the pipeline depends on but does not own.
//!
//! Emoji detection, emote vocabularies, the badge catalogue, image fetching
//! and the render queue all live outside this crate. None of these calls may
//! block: image requests and published messages are fire-and-forget.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;
use crate::token::TokenClass;

/// One emoji sequence found by an [`EmojiDetector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiMatch {
    /// The matched sequence exactly as it appears in the text.
    pub text: String,
    /// Byte offset of the match in the scanned text.
    pub start: usize,
    /// Image table index, empty when the sequence has no image.
    pub index: String,
}

/// A request for the image store to make `key` available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub key: String,
    pub class: TokenClass,
    /// Id of the message that needs the image.
    pub owner_id: String,
    /// Fetch `key` as a URL instead of resolving it through a catalogue.
    pub direct: bool,
}

pub trait EmojiDetector: Send + Sync {
    /// Find emoji sequences in `text`, in order of appearance.
    fn detect(&self, text: &str) -> Vec<EmojiMatch>;
}

/// A third-party emote word list (BTTV, FFZ, ...).
pub trait EmoteVocabulary: Send + Sync {
    fn contains(&self, word: &str) -> bool;
    fn id_for(&self, word: &str) -> Option<String>;
    /// Whether the user wants this vocabulary shown.
    fn enabled(&self) -> bool;
}

/// Cheermote prefixes and their bit tiers.
pub trait CheermoteTable: Send + Sync {
    fn contains(&self, prefix: &str) -> bool;
    /// Tier key for `amount` bits of `prefix`.
    fn tier_for(&self, prefix: &str, amount: u32) -> Option<String>;
    /// Text color used to print `amount` next to the cheermote.
    fn color_for(&self, prefix: &str, amount: u32) -> Option<String>;
    fn enabled(&self) -> bool;
}

pub trait BadgeTable: Send + Sync {
    /// Image key for badge `name` at `version`.
    fn lookup(&self, name: &str, version: &str) -> Option<String>;
}

/// Image fetch queue and texture cache.
pub trait ImageStore: Send + Sync {
    fn has_cached(&self, key: &str) -> bool;
    /// Queue a fetch. Must return immediately and tolerate duplicates.
    fn enqueue(&self, request: ImageRequest);
    /// Characters to emit after the placeholder for `key`.
    fn spacing_for(&self, _key: &str) -> String {
        String::new()
    }
}

/// Destination for fully decorated messages.
pub trait MessageSink: Send + Sync {
    fn publish(&self, message: ChatMessage);
}

/// Everything the extractor and renderer consult while decorating.
#[derive(Clone)]
pub struct Collaborators {
    pub emoji: Arc<dyn EmojiDetector>,
    pub bttv: Arc<dyn EmoteVocabulary>,
    pub bttv_animated: Arc<dyn EmoteVocabulary>,
    pub ffz: Arc<dyn EmoteVocabulary>,
    pub cheermotes: Arc<dyn CheermoteTable>,
    pub badges: Arc<dyn BadgeTable>,
    pub images: Arc<dyn ImageStore>,
}
