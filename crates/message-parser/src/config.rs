//! Parser configuration loaded from environment-style key/value settings.

/// Which optional emote sources are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Covers both static and animated BTTV emotes.
    pub show_bttv_emotes: bool,
    pub show_ffz_emotes: bool,
    pub show_cheermotes: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            show_bttv_emotes: true,
            show_ffz_emotes: true,
            show_cheermotes: true,
        }
    }
}

impl ParserConfig {
    /// Load configuration through `lookup`, falling back to defaults for
    /// missing, empty or unrecognised values.
    pub fn load<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let g = |key: &str, default: bool| parse_bool(lookup(key).as_deref(), default);

        Self {
            show_bttv_emotes: g("SHOW_BTTV_EMOTES", defaults.show_bttv_emotes),
            show_ffz_emotes: g("SHOW_FFZ_EMOTES", defaults.show_ffz_emotes),
            show_cheermotes: g("SHOW_CHEERMOTES", defaults.show_cheermotes),
        }
    }

    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::load(|key| std::env::var(key).ok())
    }
}

fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw.map(str::trim) {
        Some("true") => true,
        Some("false") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_load_defaults_when_unset() {
        let config = ParserConfig::load(|_| None);
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn test_load_reads_flags() {
        let values: HashMap<&str, &str> = [
            ("SHOW_BTTV_EMOTES", "false"),
            ("SHOW_FFZ_EMOTES", " true "),
            ("SHOW_CHEERMOTES", "nope"),
        ]
        .into_iter()
        .collect();
        let config = ParserConfig::load(|key| values.get(key).map(|v| v.to_string()));
        assert!(!config.show_bttv_emotes);
        assert!(config.show_ffz_emotes);
        assert!(config.show_cheermotes);
    }
}
