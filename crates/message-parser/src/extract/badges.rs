use super::Extractor;
use crate::ParseError;
use crate::token::{Token, TokenClass};

/// Parse a Twitch `badges` tag such as `subscriber/12,vip/1`.
///
/// Returns `(name, version)` pairs in field order. Malformed pairs are
/// logged and skipped.
pub fn parse_badge_field(field: &str) -> Vec<(String, String)> {
    field
        .split(',')
        .filter(|raw| !raw.is_empty())
        .filter_map(|raw| match parse_badge_pair(raw) {
            Ok((name, version)) => Some((name.to_string(), version.to_string())),
            Err(e) => {
                tracing::warn!("Skipping badge: {e}");
                None
            }
        })
        .collect()
}

fn parse_badge_pair(raw: &str) -> Result<(&str, &str), ParseError> {
    let invalid = || ParseError::InvalidBadge(raw.to_string());
    let (name, version) = raw.split_once('/').ok_or_else(invalid)?;
    if name.is_empty() || version.is_empty() || version.contains('/') {
        return Err(invalid());
    }
    Ok((name, version))
}

/// Badge tokens for every pair the badge table knows about.
pub(super) fn scan(ex: &mut Extractor<'_>, field: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (name, version) in parse_badge_field(field) {
        let Some(key) = ex.collab.badges.lookup(&name, &version) else {
            tracing::trace!(name = %name, version = %version, "Unknown badge");
            continue;
        };
        tokens.extend(ex.token(String::new(), key, TokenClass::Badge, false));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_badge_field() {
        assert_eq!(
            parse_badge_field("subscriber/12,vip/1"),
            vec![
                ("subscriber".to_string(), "12".to_string()),
                ("vip".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_badge_field_skips_malformed() {
        let parsed = parse_badge_field("broadcaster,/1,moderator/1,founder/,a/b/c,");
        assert_eq!(parsed, vec![("moderator".to_string(), "1".to_string())]);
        assert!(parse_badge_field("").is_empty());
    }
}
