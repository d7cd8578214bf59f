use crate::mood::Mood;
use serde::{Deserialize, Serialize};

/// A recommendable song.
///
/// Curated catalog entries fill the audio-feature fields; songs coming from
/// the external catalog fill the link fields instead. Empty optional fields
/// are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    /// Release year, when known.
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Perceived intensity, 0–1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Musical positiveness, 0–1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Catalog bucket this song was recommended from.
    pub mood: Mood,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u8>,
}

impl Song {
    /// Curated entry with audio features and no external links.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn curated(
        mood: Mood,
        title: &str,
        artist: &str,
        year: u16,
        genre: &str,
        energy: f64,
        valence: f64,
        tags: &[&str],
    ) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            year: Some(year),
            genre: Some(genre.to_string()),
            energy: Some(energy),
            valence: Some(valence),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            mood,
            album: None,
            preview_url: None,
            external_url: None,
            album_art: None,
            duration_ms: None,
            popularity: None,
        }
    }

    /// Euclidean distance between this song's (valence, energy) and a target.
    ///
    /// Songs without audio features sit at the far corner of the unit square
    /// so they sort last.
    #[must_use]
    pub fn feature_distance(&self, target_valence: f64, target_energy: f64) -> f64 {
        match (self.valence, self.energy) {
            (Some(valence), Some(energy)) => {
                (valence - target_valence).hypot(energy - target_energy)
            }
            _ => std::f64::consts::SQRT_2,
        }
    }
}
