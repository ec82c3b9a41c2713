//! Per-sender display colors.
//!
//! Senders without a platform color get a pastel color derived from their
//! display name. The same name always yields the same color, and results
//! are cached for the lifetime of the cache object.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Name-hash to color map shared by every parse call.
///
/// Entries are only ever added. Concurrent callers computing the same entry
/// produce the same value, so whichever insert lands first is kept.
#[derive(Debug, Default)]
pub struct SenderColorCache {
    colors: Mutex<HashMap<u64, String>>,
}

impl SenderColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `sender_name`.
    ///
    /// A non-empty `explicit` color is returned unchanged and not cached.
    pub fn color_for(&self, sender_name: &str, explicit: &str) -> String {
        if !explicit.is_empty() {
            return explicit.to_string();
        }

        let hash = name_hash(sender_name);
        let Ok(mut colors) = self.colors.lock() else {
            tracing::warn!(sender_name, "Color cache lock poisoned, computing uncached");
            return generate_color(hash);
        };
        colors
            .entry(hash)
            .or_insert_with(|| generate_color(hash))
            .clone()
    }

    /// Cached color for `sender_name`, if one was generated.
    pub fn cached(&self, sender_name: &str) -> Option<String> {
        let colors = self.colors.lock().ok()?;
        colors.get(&name_hash(sender_name)).cloned()
    }

    /// Number of cached senders.
    pub fn len(&self) -> usize {
        self.colors.lock().map(|colors| colors.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable 64-bit hash of a display name.
pub fn name_hash(sender_name: &str) -> u64 {
    let digest = Sha256::digest(sender_name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Deterministic pastel color for `hash`, formatted `#RRGGBBFF`.
pub fn generate_color(hash: u64) -> String {
    let mut rng = StdRng::seed_from_u64(hash);
    let r = pastel(rng.gen_range(0..255));
    let g = pastel(rng.gen_range(0..255));
    let b = pastel(rng.gen_range(0..255));
    format!("#{r:02X}{g:02X}{b:02X}FF")
}

/// Blend a channel halfway towards white.
fn pastel(channel: u8) -> u8 {
    ((u16::from(channel) + 255) / 2) as u8
}
