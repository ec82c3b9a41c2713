use std::collections::HashSet;

use super::Extractor;
use crate::token::{Token, TokenClass};

/// Appended to the emoji table index to form the image key.
const EMOJI_EXTENSION: &str = ".png";

/// Detect emoji in `text`.
///
/// Returns one token per distinct image key, in order of first appearance,
/// plus a copy of `text` with every detected sequence replaced by a space.
/// Native emote offsets are expressed against that copy.
pub(super) fn scan(ex: &mut Extractor<'_>, text: &str) -> (Vec<Token>, String) {
    let mut stripped = text.to_string();
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for found in ex.collab.emoji.detect(text) {
        if found.text.is_empty() {
            continue;
        }
        stripped = stripped.replace(&found.text, " ");

        if found.index.is_empty() {
            continue;
        }
        let key = format!("{}{EMOJI_EXTENSION}", found.index);
        if !seen.insert(key.clone()) {
            continue;
        }
        tokens.extend(ex.token(found.text, key, TokenClass::Emoji, false));
    }

    (tokens, stripped)
}
