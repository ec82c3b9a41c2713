use serde::{Deserialize, Serialize};

use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitch,
    YouTube,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    pub id: String,
    pub display_name: String,
    /// Color chosen by the sender on the platform, empty when unset.
    #[serde(default)]
    pub color: String,
}

/// Platform-specific metadata attached to a chat line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PlatformPayload {
    Twitch {
        /// Raw `emotes` tag, e.g. `25:0-4,12-16/1902:6-10`.
        #[serde(default)]
        emotes: String,
        /// Raw `badges` tag, e.g. `subscriber/12,vip/1`.
        #[serde(default)]
        badges: String,
        #[serde(default)]
        bits: u32,
    },
    YouTube { profile_image_url: String },
}

impl PlatformPayload {
    pub fn platform(&self) -> Platform {
        match self {
            Self::Twitch { .. } => Platform::Twitch,
            Self::YouTube { .. } => Platform::YouTube,
        }
    }
}

/// A chat line as received, plus the output the pipeline fills in.
///
/// `text` and the metadata are never modified by the pipeline; the
/// `display_*`, `emotes` and `badges` fields are overwritten on every
/// decoration pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub payload: PlatformPayload,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub display_text: String,
    #[serde(default)]
    pub display_color: String,
    /// Emote and emoji tokens in rendering order.
    #[serde(default)]
    pub emotes: Vec<Token>,
    /// Badge tokens in left-to-right display order.
    #[serde(default)]
    pub badges: Vec<Token>,
}

impl ChatMessage {
    /// A Twitch message without emote, badge or bits metadata.
    pub fn twitch(id: impl Into<String>, sender: Sender, text: impl Into<String>) -> Self {
        Self::new(
            id.into(),
            sender,
            text.into(),
            PlatformPayload::Twitch {
                emotes: String::new(),
                badges: String::new(),
                bits: 0,
            },
        )
    }

    pub fn youtube(
        id: impl Into<String>,
        sender: Sender,
        text: impl Into<String>,
        profile_image_url: impl Into<String>,
    ) -> Self {
        Self::new(
            id.into(),
            sender,
            text.into(),
            PlatformPayload::YouTube {
                profile_image_url: profile_image_url.into(),
            },
        )
    }

    fn new(id: String, sender: Sender, text: String, payload: PlatformPayload) -> Self {
        Self {
            id,
            sender,
            text,
            payload,
            created_at: 0,
            display_text: String::new(),
            display_color: String::new(),
            emotes: Vec::new(),
            badges: Vec::new(),
        }
    }

    /// Set the Twitch `emotes` tag. No effect on other platforms.
    pub fn with_emotes(mut self, field: impl Into<String>) -> Self {
        if let PlatformPayload::Twitch { emotes, .. } = &mut self.payload {
            *emotes = field.into();
        }
        self
    }

    /// Set the Twitch `badges` tag. No effect on other platforms.
    pub fn with_badges(mut self, field: impl Into<String>) -> Self {
        if let PlatformPayload::Twitch { badges, .. } = &mut self.payload {
            *badges = field.into();
        }
        self
    }

    /// Set the Twitch bit count. No effect on other platforms.
    pub fn with_bits(mut self, amount: u32) -> Self {
        if let PlatformPayload::Twitch { bits, .. } = &mut self.payload {
            *bits = amount;
        }
        self
    }

    pub fn platform(&self) -> Platform {
        self.payload.platform()
    }

    /// All resolved tokens: badges first, then emotes.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.badges.iter().chain(self.emotes.iter())
    }
}

impl Sender {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            color: String::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_deserializes_with_defaults() {
        let raw = r#"{
            "id": "m1",
            "sender": {"id": "u1", "display_name": "Ann"},
            "text": "gg wp Kappa",
            "payload": {"platform": "twitch", "emotes": "25:6-10"}
        }"#;
        let msg: ChatMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.platform(), Platform::Twitch);
        assert!(msg.sender.color.is_empty());
        assert!(msg.display_text.is_empty());
        match msg.payload {
            PlatformPayload::Twitch {
                emotes,
                badges,
                bits,
            } => {
                assert_eq!(emotes, "25:6-10");
                assert!(badges.is_empty());
                assert_eq!(bits, 0);
            }
            PlatformPayload::YouTube { .. } => panic!("expected twitch payload"),
        }
    }

    #[test]
    fn test_youtube_payload_ignores_twitch_builders() {
        let msg = ChatMessage::youtube("m2", Sender::new("u2", "Bob"), "hi", "https://yt/p.png")
            .with_emotes("25:0-1")
            .with_bits(100);
        assert_eq!(msg.platform(), Platform::YouTube);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["payload"]["platform"], "youtube");
        assert_eq!(json["payload"]["profile_image_url"], "https://yt/p.png");
    }
}
