use std::collections::HashSet;

use super::Extractor;
use crate::ParseError;
use crate::token::{Token, TokenClass};

/// A native emote id with every range it occupies in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeEmote {
    pub id: String,
    /// Inclusive `(start, end)` character offsets.
    pub ranges: Vec<(usize, usize)>,
}

/// Parse a Twitch `emotes` tag such as `25:0-4,12-16/1902:6-10`.
///
/// Malformed entries and ranges are logged and skipped. An id listed in
/// several entries is merged into one.
pub fn parse_emote_field(field: &str) -> Vec<NativeEmote> {
    let mut out: Vec<NativeEmote> = Vec::new();

    for entry in field.split('/').filter(|entry| !entry.is_empty()) {
        let Some((id, ranges_raw)) = entry.split_once(':') else {
            tracing::warn!(entry, "Emote entry without ranges");
            continue;
        };
        if id.is_empty() || !id.chars().all(is_emote_id_char) {
            tracing::warn!(entry, "Emote entry with invalid id");
            continue;
        }

        let mut ranges = Vec::new();
        for raw in ranges_raw.split(',') {
            match parse_range(raw) {
                Ok(range) => ranges.push(range),
                Err(e) => tracing::warn!(id, "Skipping emote range: {e}"),
            }
        }
        if ranges.is_empty() {
            continue;
        }

        match out.iter_mut().find(|emote| emote.id == id) {
            Some(existing) => existing.ranges.extend(ranges),
            None => out.push(NativeEmote {
                id: id.to_string(),
                ranges,
            }),
        }
    }

    out
}

fn is_emote_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn parse_range(raw: &str) -> Result<(usize, usize), ParseError> {
    let invalid = || ParseError::InvalidEmoteRange(raw.to_string());
    let (start, end) = raw.split_once('-').ok_or_else(invalid)?;
    let start: usize = start.parse().map_err(|_| invalid())?;
    let end: usize = end.parse().map_err(|_| invalid())?;
    if start > end {
        return Err(invalid());
    }
    Ok((start, end))
}

/// Characters `start..=end` of `text`, or `None` if the range runs past it.
fn slice_inclusive(text: &str, start: usize, end: usize) -> Option<String> {
    let len = end.checked_sub(start)?.checked_add(1)?;
    let slice: String = text.chars().skip(start).take(len).collect();
    (slice.chars().count() == len).then_some(slice)
}

/// One token per distinct emote id.
///
/// The token text is taken from the first range that fits inside
/// `emoji_stripped`; later ranges of the same id are not consulted.
pub(super) fn scan(ex: &mut Extractor<'_>, field: &str, emoji_stripped: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut seen = HashSet::new();

    for emote in parse_emote_field(field) {
        if !seen.insert(emote.id.clone()) {
            continue;
        }
        let name = emote
            .ranges
            .iter()
            .find_map(|&(start, end)| slice_inclusive(emoji_stripped, start, end));
        let Some(name) = name else {
            tracing::warn!(
                message_id = ex.message_id,
                id = %emote.id,
                "Emote ranges fall outside the message"
            );
            continue;
        };
        tokens.extend(ex.token(name, format!("T{}", emote.id), TokenClass::TwitchEmote, false));
    }

    tokens
}
