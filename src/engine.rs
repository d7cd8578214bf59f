//! Full pipeline: detect a mood from text, then recommend songs for it.

use crate::algorithm::{self, Detection, MoodScores, ScoringContext};
use crate::catalog::{SongSource, StaticCatalog};
use crate::config::{CatalogBackend, ServerConfig, DEFAULT_NUM_SONGS};
use crate::error::Result;
use crate::mood::{Intensity, Mood};
use crate::song::Song;
use crate::spotify::SpotifyCatalog;
use serde::Serialize;

/// Everything known about one analyzed piece of text.
///
/// Field names follow the public JSON shape of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub user_input: String,
    pub detected_mood: Mood,
    pub confidence: f64,
    pub intensity: Intensity,
    pub recommendations: Vec<Song>,
    pub emotion_scores: MoodScores,
}

impl AnalysisResult {
    fn new(text: &str, detection: Detection, recommendations: Vec<Song>) -> Self {
        Self {
            user_input: text.to_string(),
            detected_mood: detection.mood,
            confidence: detection.confidence,
            intensity: detection.intensity,
            recommendations,
            emotion_scores: detection.scores,
        }
    }
}

/// Scoring context plus a song source.
pub struct MoodTune {
    context: ScoringContext,
    source: Box<dyn SongSource>,
}

impl Default for MoodTune {
    fn default() -> Self {
        Self::new(ScoringContext::default(), Box::new(StaticCatalog))
    }
}

impl MoodTune {
    #[must_use]
    pub fn new(context: ScoringContext, source: Box<dyn SongSource>) -> Self {
        Self { context, source }
    }

    /// Builds the engine with the song source selected in `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let source: Box<dyn SongSource> = match config.catalog {
            CatalogBackend::Static => Box::new(StaticCatalog),
            CatalogBackend::Spotify => Box::new(SpotifyCatalog::new(config.spotify.clone())?),
        };
        log::info!("Using {} song source", source.name());
        Ok(Self::new(ScoringContext::default(), source))
    }

    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    #[must_use]
    pub fn context(&self) -> &ScoringContext {
        &self.context
    }

    /// Detects the mood of `text` and attaches up to `num_songs` songs.
    pub fn analyze(&self, text: &str, num_songs: usize) -> Result<AnalysisResult> {
        let detection = algorithm::detect(text, &self.context);
        let recommendations = self.source.recommend(detection.mood, num_songs)?;
        Ok(AnalysisResult::new(text, detection, recommendations))
    }

    /// Analyzes each text in order, stopping at the first source error.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S], num_songs: usize) -> Result<Vec<AnalysisResult>> {
        algorithm::batch_detect(texts, &self.context)
            .map(|(text, detection)| {
                let recommendations = self.source.recommend(detection.mood, num_songs)?;
                Ok(AnalysisResult::new(text, detection, recommendations))
            })
            .collect()
    }

    /// Recommendations for a known mood.
    pub fn recommend(&self, mood: Mood, count: usize) -> Result<Vec<Song>> {
        self.source.recommend(mood, count)
    }

    /// Recommendations for a mood label, rejecting labels outside the set.
    pub fn recommend_by_name(&self, label: &str, count: usize) -> Result<Vec<Song>> {
        let mood: Mood = label.parse()?;
        self.recommend(mood, count)
    }

    /// All mood labels in priority order.
    #[must_use]
    pub fn moods(&self) -> Vec<&'static str> {
        Mood::names()
    }
}

/// Analyzes `text` against the curated catalog with default settings.
///
/// ```
/// use moodtune::engine::analyze;
/// use moodtune::mood::Mood;
///
/// let result = analyze("Need some workout music, feeling energetic!");
/// assert_eq!(result.detected_mood, Mood::Energetic);
/// assert_eq!(result.recommendations.len(), 5);
/// ```
#[must_use]
pub fn analyze(text: &str) -> AnalysisResult {
    let detection = algorithm::detect(text, &ScoringContext::default());
    let recommendations = crate::catalog::recommend(detection.mood, DEFAULT_NUM_SONGS);
    AnalysisResult::new(text, detection, recommendations)
}
