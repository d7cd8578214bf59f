//! # Mood Labels
//!
//! The fixed set of nine moods used both as detection output and as catalog
//! buckets, plus the coarse intensity tier attached to a detection.
//!
//! The declaration order of [`Mood`] is the priority order used to break
//! scoring ties: when two moods share the top score, the one declared first
//! wins. `Ord` is derived from that order, so a `BTreeMap<Mood, _>` iterates
//! in priority order as well.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine emotional categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Calm,
    Romantic,
    Angry,
    Anxious,
    Nostalgic,
    Confident,
}

impl Mood {
    /// Every mood, in tie-break priority order.
    pub const ALL: [Mood; 9] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Calm,
        Mood::Romantic,
        Mood::Angry,
        Mood::Anxious,
        Mood::Nostalgic,
        Mood::Confident,
    ];

    /// Lowercase label as used on the wire and in the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Romantic => "romantic",
            Mood::Angry => "angry",
            Mood::Anxious => "anxious",
            Mood::Nostalgic => "nostalgic",
            Mood::Confident => "confident",
        }
    }

    /// All labels in priority order.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Mood::ALL.iter().map(|mood| mood.as_str()).collect()
    }

    /// Target audio features for this mood.
    #[must_use]
    pub fn profile(self) -> &'static MoodProfile {
        &PROFILES[self as usize]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = Error;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownMood(wanted.to_string()))
    }
}

/// Coarse tier derived from the winning mood's absolute score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        })
    }
}

/// Audio-feature targets describing what a mood sounds like.
///
/// Used to rank the curated catalog and to build queries against the
/// external catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodProfile {
    pub target_valence: f64,
    pub target_energy: f64,
    pub seed_genres: [&'static str; 3],
}

// Indexed by `Mood as usize`.
const PROFILES: [MoodProfile; 9] = [
    MoodProfile { target_valence: 0.8, target_energy: 0.7, seed_genres: ["pop", "dance", "funk"] },
    MoodProfile { target_valence: 0.3, target_energy: 0.4, seed_genres: ["acoustic", "piano", "sad"] },
    MoodProfile { target_valence: 0.6, target_energy: 0.9, seed_genres: ["rock", "edm", "workout"] },
    MoodProfile { target_valence: 0.5, target_energy: 0.3, seed_genres: ["ambient", "chill", "classical"] },
    MoodProfile { target_valence: 0.7, target_energy: 0.5, seed_genres: ["r-n-b", "soul", "romance"] },
    MoodProfile { target_valence: 0.3, target_energy: 0.9, seed_genres: ["metal", "hard-rock", "punk"] },
    MoodProfile { target_valence: 0.4, target_energy: 0.5, seed_genres: ["alternative", "indie", "folk"] },
    MoodProfile { target_valence: 0.6, target_energy: 0.6, seed_genres: ["classic-rock", "oldies", "retro"] },
    MoodProfile { target_valence: 0.7, target_energy: 0.8, seed_genres: ["hip-hop", "rap", "power"] },
];
