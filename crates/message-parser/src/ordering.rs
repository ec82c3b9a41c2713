//! Order in which tokens are applied to the text.
//!
//! Whole-word tokens go first because they need the original word
//! boundaries. Emoji are replaced by substring afterwards, longest sequence
//! first, so a multi-codepoint sequence is never split by a shorter sequence
//! it contains.

use crate::token::Token;

/// Sort emoji tokens by descending matched length, keeping discovery order
/// between equal lengths.
pub fn sort_emoji(tokens: &mut [Token]) {
    tokens.sort_by_key(|token| std::cmp::Reverse(token.text.chars().count()));
}

/// Tokens split into the two substitution phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan<'a> {
    /// Whole-word replacements, in list order.
    pub words: Vec<&'a Token>,
    /// Substring replacements, longest first.
    pub emoji: Vec<&'a Token>,
}

pub fn plan(tokens: &[Token]) -> RenderPlan<'_> {
    let (mut emoji, words): (Vec<&Token>, Vec<&Token>) =
        tokens.iter().partition(|token| token.is_emoji());
    emoji.sort_by_key(|token| std::cmp::Reverse(token.text.chars().count()));
    RenderPlan { words, emoji }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenClass;

    fn token(placeholder: char, text: &str, class: TokenClass) -> Token {
        Token {
            placeholder,
            text: text.into(),
            image_key: format!("k{text}"),
            class,
            spacing: String::new(),
        }
    }

    #[test]
    fn test_sort_emoji_longest_first_and_stable() {
        let mut tokens = vec![
            token('\u{E000}', "a", TokenClass::Emoji),
            token('\u{E001}', "abc", TokenClass::Emoji),
            token('\u{E002}', "b", TokenClass::Emoji),
            token('\u{E003}', "ab", TokenClass::Emoji),
        ];
        sort_emoji(&mut tokens);
        let order: Vec<char> = tokens.iter().map(|t| t.placeholder).collect();
        assert_eq!(order, vec!['\u{E001}', '\u{E003}', '\u{E000}', '\u{E002}']);
    }

    #[test]
    fn test_plan_separates_phases() {
        let tokens = vec![
            token('\u{E000}', "x", TokenClass::Emoji),
            token('\u{E001}', "Kappa", TokenClass::TwitchEmote),
            token('\u{E002}', "xyz", TokenClass::Emoji),
            token('\u{E003}', "catJAM", TokenClass::Bttv),
        ];
        let plan = plan(&tokens);
        let words: Vec<&str> = plan.words.iter().map(|t| t.text.as_str()).collect();
        let emoji: Vec<&str> = plan.emoji.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Kappa", "catJAM"]);
        assert_eq!(emoji, vec!["xyz", "x"]);
    }
}
