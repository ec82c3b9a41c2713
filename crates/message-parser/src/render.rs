//! Substitution of tokens into display text and header assembly.
//!
//! Output uses TextMeshPro-style rich text tags (`<color>`, `<b>`,
//! `<size>`), which is what the downstream renderer understands.

use crate::collab::CheermoteTable;
use crate::extract::parse_cheer;
use crate::ordering;
use crate::token::{Token, TokenClass};

/// Zero-width anchor emitted before every placeholder.
pub const MARKER: char = '\u{FEFF}';
const HAIR_SPACE: char = '\u{200A}';
const NO_BREAK_SPACE: char = '\u{00A0}';

/// Sender details for the name header.
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    pub sender_name: &'a str,
    pub color: &'a str,
    pub is_action: bool,
}

/// Produce the fully decorated message.
///
/// `emotes` are substituted into `text`, then the sender header and the
/// badge header are put in front.
pub fn render(
    text: &str,
    emotes: &[Token],
    badges: &[Token],
    header: &Header<'_>,
    cheermotes: &dyn CheermoteTable,
) -> String {
    let body = substitute(text, emotes, cheermotes);
    let mut out = badge_header(badges);
    out.push_str(&sender_header(header, &body));
    out
}

/// Replace every token occurrence in `text` with its placeholder.
pub fn substitute(text: &str, tokens: &[Token], cheermotes: &dyn CheermoteTable) -> String {
    let plan = ordering::plan(tokens);

    let mut words: Vec<String> = text.split(' ').map(str::to_string).collect();
    for token in &plan.words {
        let annotation = match token.class {
            TokenClass::Cheermote => cheer_annotation(token, cheermotes).unwrap_or_default(),
            _ => String::new(),
        };
        let replacement = placeholder_run(token, &annotation);
        for word in words.iter_mut().filter(|word| **word == token.text) {
            *word = replacement.clone();
        }
    }

    let mut out = words.join(" ");
    for token in &plan.emoji {
        out = out.replace(&token.text, &placeholder_run(token, ""));
    }
    out
}

fn placeholder_run(token: &Token, annotation: &str) -> String {
    format!(
        "{MARKER}{}{}{annotation}",
        token.placeholder, token.spacing
    )
}

/// Bit amount printed next to a cheermote in its tier color.
///
/// `None` (logged) when the amount or color cannot be recovered.
pub fn cheer_annotation(token: &Token, cheermotes: &dyn CheermoteTable) -> Option<String> {
    let cheer = match parse_cheer(&token.text) {
        Ok(Some(cheer)) => cheer,
        Ok(None) => {
            tracing::warn!(word = %token.text, "Cheermote token no longer parses");
            return None;
        }
        Err(e) => {
            tracing::warn!(word = %token.text, "Failed to parse cheermote: {e}");
            return None;
        }
    };
    let Some(color) = cheermotes.color_for(&cheer.prefix, cheer.amount) else {
        tracing::warn!(
            prefix = %cheer.prefix,
            amount = cheer.amount,
            "No tier color for cheermote"
        );
        return None;
    };
    Some(format!(
        "{HAIR_SPACE}<color={color}><size=4><b>{}</b></size></color>{HAIR_SPACE}",
        cheer.digits
    ))
}

/// Colored sender name followed by the message body.
///
/// Action messages keep the whole body inside the color tag and drop the
/// colon.
pub fn sender_header(header: &Header<'_>, body: &str) -> String {
    let Header {
        sender_name,
        color,
        is_action,
    } = *header;
    if is_action {
        format!("<color={color}><b>{sender_name}</b> {body}</color>")
    } else {
        format!("<color={color}><b>{sender_name}</b></color>: {body}")
    }
}

/// Leading marker plus one placeholder per badge, in the given order.
pub fn badge_header(badges: &[Token]) -> String {
    let mut out = String::from(MARKER);
    for badge in badges {
        out.push(badge.placeholder);
        out.push_str(&badge.spacing);
        out.push(NO_BREAK_SPACE);
    }
    out
}
