//! Chat message annotation pipeline.
//!
//! Turns a raw chat line plus its platform metadata into display text where
//! every emote, emoji and badge is replaced by a private-use placeholder
//! codepoint, and assigns each sender a stable display color. Image
//! downloads, rendering and chat networking stay with the caller behind the
//! traits in [`collab`].

pub mod assets;
pub mod collab;
pub mod color;
pub mod config;
pub mod extract;
pub mod message;
pub mod ordering;
pub mod parser;
pub mod queue;
pub mod render;
pub mod token;

#[cfg(test)]
mod tests;

pub use assets::AssetTables;
pub use collab::Collaborators;
pub use color::SenderColorCache;
pub use config::ParserConfig;
pub use message::{ChatMessage, Platform, PlatformPayload, Sender};
pub use parser::MessageParser;
pub use queue::{ChannelSink, QueuedImageStore};
pub use token::{PlaceholderAllocator, Token, TokenClass};

/// Unified error type for the message-parser crate.
///
/// Only asset loading surfaces these to callers. The per-token variants are
/// produced by the metadata parsers and logged by the pipeline, which then
/// carries on without the offending token.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Placeholder range exhausted")]
    PlaceholdersExhausted,

    #[error("Invalid emote range: {0}")]
    InvalidEmoteRange(String),

    #[error("Invalid badge entry: {0}")]
    InvalidBadge(String),

    #[error("Invalid cheer amount: {0}")]
    InvalidCheerAmount(String),

    #[error("Asset table parse error: {0}")]
    Assets(#[from] serde_json::Error),
}
