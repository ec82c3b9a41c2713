//! Recognised tokens and placeholder allocation.

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// First codepoint handed out to a token (start of the BMP private-use area).
pub const PLACEHOLDER_BASE: u32 = 0xE000;
/// Last usable codepoint of the BMP private-use area.
pub const PLACEHOLDER_LAST: u32 = 0xF8FF;

/// What kind of image a token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    /// Platform-native emote located by explicit offsets.
    TwitchEmote,
    Emoji,
    Bttv,
    BttvAnimated,
    Ffz,
    /// Bit-donation word such as `cheer100`.
    Cheermote,
    Badge,
    /// Sender avatar shown in place of badges on platforms without them.
    ProfileImage,
}

impl TokenClass {
    /// Emoji are replaced by substring, everything else by whole word.
    pub fn is_emoji(self) -> bool {
        matches!(self, Self::Emoji)
    }

    /// Badge-like tokens go in front of the sender name.
    pub fn is_badge(self) -> bool {
        matches!(self, Self::Badge | Self::ProfileImage)
    }
}

/// A recognised emote, emoji or badge paired with the image that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Private-use codepoint standing in for the image. Unique per message.
    pub placeholder: char,
    /// Text the placeholder replaces. Empty for badges.
    pub text: String,
    /// Opaque key the image store resolves.
    pub image_key: String,
    pub class: TokenClass,
    /// Extra characters emitted after the placeholder so the image has room.
    #[serde(default)]
    pub spacing: String,
}

impl Token {
    pub fn is_emoji(&self) -> bool {
        self.class.is_emoji()
    }
}

/// Hands out placeholder codepoints for one message.
///
/// Codepoints increase by one per token in discovery order. Running past the
/// end of the range is reported instead of wrapping into non-private
/// codepoints.
#[derive(Debug, Clone)]
pub struct PlaceholderAllocator {
    next: u32,
    last: u32,
}

impl PlaceholderAllocator {
    pub fn new() -> Self {
        Self::with_range(PLACEHOLDER_BASE, PLACEHOLDER_LAST)
    }

    /// Allocator over an inclusive codepoint range.
    pub fn with_range(first: u32, last: u32) -> Self {
        Self { next: first, last }
    }

    /// Take the next free codepoint.
    pub fn allocate(&mut self) -> Result<char, ParseError> {
        if self.next > self.last {
            return Err(ParseError::PlaceholdersExhausted);
        }
        let placeholder = char::from_u32(self.next).ok_or(ParseError::PlaceholdersExhausted)?;
        self.next += 1;
        Ok(placeholder)
    }

    /// Number of codepoints still available.
    pub fn remaining(&self) -> usize {
        if self.next > self.last {
            0
        } else {
            (self.last - self.next + 1) as usize
        }
    }
}

impl Default for PlaceholderAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `c` lies in the range placeholders are drawn from.
pub fn is_placeholder(c: char) -> bool {
    (PLACEHOLDER_BASE..=PLACEHOLDER_LAST).contains(&(c as u32))
}
