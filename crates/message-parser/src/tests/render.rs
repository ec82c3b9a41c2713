use crate::assets::CheermoteTiers;
use crate::collab::CheermoteTable;
use crate::render::{Header, badge_header, cheer_annotation, render, sender_header, substitute};
use crate::token::{Token, TokenClass};

fn token(placeholder: char, text: &str, class: TokenClass) -> Token {
    Token {
        placeholder,
        text: text.into(),
        image_key: format!("key-{text}"),
        class,
        spacing: String::new(),
    }
}

fn no_cheers() -> CheermoteTiers {
    CheermoteTiers::default()
}

/// Knows every prefix but has lost its tier colors.
struct ColorlessCheers;

impl CheermoteTable for ColorlessCheers {
    fn contains(&self, _prefix: &str) -> bool {
        true
    }

    fn tier_for(&self, _prefix: &str, _amount: u32) -> Option<String> {
        Some("1".into())
    }

    fn color_for(&self, _prefix: &str, _amount: u32) -> Option<String> {
        None
    }

    fn enabled(&self) -> bool {
        true
    }
}

fn cheers() -> CheermoteTiers {
    let tables = super::tables();
    CheermoteTiers::new(tables.cheermotes, true)
}

#[test]
fn test_whole_word_replacement_only() {
    let tokens = vec![token('\u{E000}', "Kappa", TokenClass::TwitchEmote)];
    let out = substitute("Kappa KappaPride Kappa", &tokens, &no_cheers());
    assert_eq!(out, "\u{FEFF}\u{E000} KappaPride \u{FEFF}\u{E000}");
}

#[test]
fn test_longest_emoji_wins_regardless_of_input_order() {
    let tokens = vec![
        token('\u{E000}', "👍", TokenClass::Emoji),
        token('\u{E001}', "👍🏽", TokenClass::Emoji),
    ];
    let out = substitute("a 👍🏽 b 👍", &tokens, &no_cheers());
    assert_eq!(out, "a \u{FEFF}\u{E001} b \u{FEFF}\u{E000}");
    assert!(!out.contains('\u{1F3FD}'));
}

#[test]
fn test_emoji_replaced_inside_words_after_word_pass() {
    let tokens = vec![
        token('\u{E000}', "😀", TokenClass::Emoji),
        token('\u{E001}', "hi", TokenClass::Bttv),
    ];
    let out = substitute("hi😀 hi", &tokens, &no_cheers());
    assert_eq!(out, "hi\u{FEFF}\u{E000} \u{FEFF}\u{E001}");
}

#[test]
fn test_spacing_follows_placeholder() {
    let mut kappa = token('\u{E000}', "Kappa", TokenClass::TwitchEmote);
    kappa.spacing = "\u{2009}\u{2009}".into();
    let out = substitute("Kappa", &[kappa], &no_cheers());
    assert_eq!(out, "\u{FEFF}\u{E000}\u{2009}\u{2009}");
}

#[test]
fn test_cheermote_annotation() {
    let tokens = vec![token('\u{E000}', "Cheer100", TokenClass::Cheermote)];
    let out = substitute("Cheer100 nice", &tokens, &cheers());
    assert_eq!(
        out,
        "\u{FEFF}\u{E000}\u{200A}<color=#9c3ee8><size=4><b>100</b></size></color>\u{200A} nice"
    );
}

#[test]
fn test_cheermote_annotation_omitted_without_color() {
    let cheer = token('\u{E000}', "Cheer100", TokenClass::Cheermote);
    assert_eq!(cheer_annotation(&cheer, &ColorlessCheers), None);

    let out = substitute("Cheer100", &[cheer], &ColorlessCheers);
    assert_eq!(out, "\u{FEFF}\u{E000}");
}

#[test]
fn test_badge_header_keeps_discovery_order() {
    let badges = vec![
        token('\u{E000}', "", TokenClass::Badge),
        token('\u{E001}', "", TokenClass::Badge),
        token('\u{E002}', "", TokenClass::Badge),
    ];
    assert_eq!(
        badge_header(&badges),
        "\u{FEFF}\u{E000}\u{A0}\u{E001}\u{A0}\u{E002}\u{A0}"
    );
    assert_eq!(badge_header(&[]), "\u{FEFF}");
}

#[test]
fn test_sender_header_plain_and_action() {
    let mut header = Header {
        sender_name: "Ann",
        color: "#AABBCCFF",
        is_action: false,
    };
    assert_eq!(
        sender_header(&header, "hello"),
        "<color=#AABBCCFF><b>Ann</b></color>: hello"
    );

    header.is_action = true;
    assert_eq!(
        sender_header(&header, "waves"),
        "<color=#AABBCCFF><b>Ann</b> waves</color>"
    );
}

#[test]
fn test_render_assembles_badges_header_and_body() {
    let emotes = vec![token('\u{E001}', "Kappa", TokenClass::TwitchEmote)];
    let badges = vec![token('\u{E000}', "", TokenClass::Badge)];
    let header = Header {
        sender_name: "Ann",
        color: "#FFFFFFFF",
        is_action: false,
    };
    let out = render("gg Kappa", &emotes, &badges, &header, &no_cheers());
    assert_eq!(
        out,
        "\u{FEFF}\u{E000}\u{A0}<color=#FFFFFFFF><b>Ann</b></color>: gg \u{FEFF}\u{E001}"
    );
}
