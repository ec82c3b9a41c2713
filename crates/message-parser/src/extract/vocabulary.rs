use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::Extractor;
use crate::ParseError;
use crate::collab::{Collaborators, EmoteVocabulary};
use crate::token::{Token, TokenClass};

static CHEER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<prefix>[a-z]+)(?P<amount>[0-9]+)$").unwrap());

/// A bit-donation word split into prefix and amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cheer {
    /// Lower-cased cheermote prefix, e.g. `cheer`.
    pub prefix: String,
    pub amount: u32,
    /// The amount exactly as typed.
    pub digits: String,
}

/// Split a word like `Cheer100` into prefix and amount.
///
/// `Ok(None)` when the word is not shaped like a cheer; an error when it is
/// but the amount does not fit.
pub fn parse_cheer(word: &str) -> Result<Option<Cheer>, ParseError> {
    let lower = word.to_lowercase();
    let Some(caps) = CHEER_RE.captures(&lower) else {
        return Ok(None);
    };
    let digits = caps["amount"].to_string();
    let amount = digits
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidCheerAmount(digits.clone()))?;
    Ok(Some(Cheer {
        prefix: caps["prefix"].to_string(),
        amount,
        digits,
    }))
}

/// Match each distinct word of `text` against the third-party vocabularies
/// and, when the message carries bits, the cheermote table.
pub(super) fn scan(ex: &mut Extractor<'_>, text: &str, bits: u32) -> Vec<Token> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for word in text.split(' ') {
        if word.is_empty() || !seen.insert(word) {
            continue;
        }
        let Some((key, class)) = classify(ex.collab, word, bits) else {
            continue;
        };
        tokens.extend(ex.token(word.to_string(), key, class, false));
    }

    tokens
}

fn classify(collab: &Collaborators, word: &str, bits: u32) -> Option<(String, TokenClass)> {
    let vocabularies: [(&dyn EmoteVocabulary, &str, TokenClass); 3] = [
        (collab.bttv.as_ref(), "B", TokenClass::Bttv),
        (collab.bttv_animated.as_ref(), "AB", TokenClass::BttvAnimated),
        (collab.ffz.as_ref(), "F", TokenClass::Ffz),
    ];
    for (vocabulary, key_prefix, class) in vocabularies {
        if !vocabulary.contains(word) {
            continue;
        }
        // The first vocabulary holding the word decides, even when hidden.
        if !vocabulary.enabled() {
            return None;
        }
        return vocabulary
            .id_for(word)
            .map(|id| (format!("{key_prefix}{id}"), class));
    }

    if bits == 0 {
        return None;
    }
    let cheer = match parse_cheer(word) {
        Ok(Some(cheer)) => cheer,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(word, "Skipping cheermote: {e}");
            return None;
        }
    };
    let table = &collab.cheermotes;
    if !table.contains(&cheer.prefix) || !table.enabled() {
        return None;
    }
    let tier = table.tier_for(&cheer.prefix, cheer.amount)?;
    Some((format!("{}{tier}", cheer.prefix), TokenClass::Cheermote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cheer() {
        let cheer = parse_cheer("Cheer100").unwrap().unwrap();
        assert_eq!(cheer.prefix, "cheer");
        assert_eq!(cheer.amount, 100);
        assert_eq!(cheer.digits, "100");
    }

    #[test]
    fn test_parse_cheer_rejects_other_shapes() {
        assert!(parse_cheer("cheer").unwrap().is_none());
        assert!(parse_cheer("100").unwrap().is_none());
        assert!(parse_cheer("cheer100x").unwrap().is_none());
        assert!(parse_cheer("").unwrap().is_none());
    }

    #[test]
    fn test_parse_cheer_amount_overflow() {
        assert!(matches!(
            parse_cheer("cheer99999999999"),
            Err(ParseError::InvalidCheerAmount(_))
        ));
    }
}
