//! In-memory asset tables.
//!
//! Vocabularies, cheermote tiers, badge keys and the emoji table are usually
//! downloaded by the host application; this module holds them once they are
//! known and implements the lookup traits over them.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::collab::{
    BadgeTable, CheermoteTable, Collaborators, EmojiDetector, EmojiMatch, EmoteVocabulary,
    ImageStore,
};
use crate::config::ParserConfig;

/// One emoji sequence and its image table index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojiEntry {
    pub sequence: String,
    /// Empty when the sequence is recognised but has no image.
    #[serde(default)]
    pub index: String,
}

/// One bit tier of a cheermote prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheerTier {
    /// Smallest amount that uses this tier.
    pub min_bits: u32,
    /// Tier key appended to the prefix to form the image key.
    pub id: String,
    pub color: String,
}

/// All lookup tables, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetTables {
    #[serde(default)]
    pub emoji: Vec<EmojiEntry>,
    /// Word -> BTTV emote id.
    #[serde(default)]
    pub bttv: HashMap<String, String>,
    #[serde(default)]
    pub bttv_animated: HashMap<String, String>,
    /// Word -> FFZ emote id.
    #[serde(default)]
    pub ffz: HashMap<String, String>,
    /// Cheermote prefix -> tiers.
    #[serde(default)]
    pub cheermotes: HashMap<String, Vec<CheerTier>>,
    /// `name/version` -> badge image key.
    #[serde(default)]
    pub badges: HashMap<String, String>,
}

impl AssetTables {
    pub fn from_json(raw: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Wrap the tables as pipeline collaborators, applying the visibility
    /// flags from `config`.
    pub fn into_collaborators(
        self,
        config: &ParserConfig,
        images: Arc<dyn ImageStore>,
    ) -> Collaborators {
        Collaborators {
            emoji: Arc::new(EmojiTable::new(self.emoji)),
            bttv: Arc::new(StaticVocabulary::new(self.bttv, config.show_bttv_emotes)),
            bttv_animated: Arc::new(StaticVocabulary::new(
                self.bttv_animated,
                config.show_bttv_emotes,
            )),
            ffz: Arc::new(StaticVocabulary::new(self.ffz, config.show_ffz_emotes)),
            cheermotes: Arc::new(CheermoteTiers::new(self.cheermotes, config.show_cheermotes)),
            badges: Arc::new(StaticBadgeTable::new(self.badges)),
            images,
        }
    }
}

/// Emoji detector over a fixed sequence table.
///
/// Scans left to right and takes the longest sequence starting at each
/// position, so matches never overlap.
#[derive(Debug, Clone, Default)]
pub struct EmojiTable {
    entries: Vec<EmojiEntry>,
}

impl EmojiTable {
    pub fn new(entries: Vec<EmojiEntry>) -> Self {
        let mut entries: Vec<EmojiEntry> = entries
            .into_iter()
            .filter(|entry| !entry.sequence.is_empty())
            .collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.sequence.len()));
        Self { entries }
    }
}

impl EmojiDetector for EmojiTable {
    fn detect(&self, text: &str) -> Vec<EmojiMatch> {
        let mut out = Vec::new();
        let mut pos = 0;
        while let Some(rest) = text.get(pos..).filter(|rest| !rest.is_empty()) {
            match self
                .entries
                .iter()
                .find(|entry| rest.starts_with(entry.sequence.as_str()))
            {
                Some(entry) => {
                    out.push(EmojiMatch {
                        text: entry.sequence.clone(),
                        start: pos,
                        index: entry.index.clone(),
                    });
                    pos += entry.sequence.len();
                }
                None => pos += rest.chars().next().map_or(1, char::len_utf8),
            }
        }
        out
    }
}

/// Word list backed by a map of word to emote id.
#[derive(Debug, Clone, Default)]
pub struct StaticVocabulary {
    ids: HashMap<String, String>,
    enabled: bool,
}

impl StaticVocabulary {
    pub fn new(ids: HashMap<String, String>, enabled: bool) -> Self {
        Self { ids, enabled }
    }
}

impl EmoteVocabulary for StaticVocabulary {
    fn contains(&self, word: &str) -> bool {
        self.ids.contains_key(word)
    }

    fn id_for(&self, word: &str) -> Option<String> {
        self.ids.get(word).cloned()
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Cheermote prefixes with their tier ladders.
#[derive(Debug, Clone, Default)]
pub struct CheermoteTiers {
    /// Lower-cased prefix -> tiers sorted by ascending `min_bits`.
    tiers: HashMap<String, Vec<CheerTier>>,
    enabled: bool,
}

impl CheermoteTiers {
    pub fn new(tiers: HashMap<String, Vec<CheerTier>>, enabled: bool) -> Self {
        let tiers = tiers
            .into_iter()
            .map(|(prefix, mut ladder)| {
                ladder.sort_by_key(|tier| tier.min_bits);
                (prefix.to_lowercase(), ladder)
            })
            .collect();
        Self { tiers, enabled }
    }

    /// Highest tier whose threshold `amount` reaches.
    fn tier(&self, prefix: &str, amount: u32) -> Option<&CheerTier> {
        self.tiers
            .get(prefix)?
            .iter()
            .rev()
            .find(|tier| amount >= tier.min_bits)
    }
}

impl CheermoteTable for CheermoteTiers {
    fn contains(&self, prefix: &str) -> bool {
        self.tiers.contains_key(prefix)
    }

    fn tier_for(&self, prefix: &str, amount: u32) -> Option<String> {
        self.tier(prefix, amount).map(|tier| tier.id.clone())
    }

    fn color_for(&self, prefix: &str, amount: u32) -> Option<String> {
        self.tier(prefix, amount).map(|tier| tier.color.clone())
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Badge keys indexed by `name/version`.
#[derive(Debug, Clone, Default)]
pub struct StaticBadgeTable {
    keys: HashMap<String, String>,
}

impl StaticBadgeTable {
    pub fn new(keys: HashMap<String, String>) -> Self {
        Self { keys }
    }
}

impl BadgeTable for StaticBadgeTable {
    fn lookup(&self, name: &str, version: &str) -> Option<String> {
        self.keys.get(&format!("{name}/{version}")).cloned()
    }
}
