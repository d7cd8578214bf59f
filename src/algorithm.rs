//! Mood scoring algorithm.
//!
//! Scores free text against the static lexicon and picks the best mood.

use crate::lexicon::{self, Tier};
use crate::mood::{Intensity, Mood};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-mood raw scores, always containing all nine moods.
pub type MoodScores = BTreeMap<Mood, u32>;

/// Immutable scoring parameters
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub weights: TierWeights,
    pub thresholds: IntensityThresholds,
    /// Added to the top score when normalizing the margin
    pub confidence_smoothing: f64,
    pub fallback: Fallback,
}

/// Weight added once per matched term, by tier
#[derive(Debug, Clone, Copy)]
pub struct TierWeights {
    pub primary: u32,
    pub secondary: u32,
    pub intensity: u32,
}

impl TierWeights {
    #[must_use]
    pub const fn of(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Primary => self.primary,
            Tier::Secondary => self.secondary,
            Tier::Intensity => self.intensity,
        }
    }
}

/// Minimum top score for each intensity tier
#[derive(Debug, Clone, Copy)]
pub struct IntensityThresholds {
    pub medium: u32,
    pub high: u32,
}

/// Result used when no lexicon term matched at all
#[derive(Debug, Clone, Copy)]
pub struct Fallback {
    pub mood: Mood,
    pub confidence: f64,
    pub intensity: Intensity,
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self {
            weights: TierWeights {
                primary: 3,
                secondary: 1,
                intensity: 5,
            },
            thresholds: IntensityThresholds { medium: 3, high: 5 },
            confidence_smoothing: 1.0,
            fallback: Fallback {
                mood: Mood::Calm,
                confidence: 0.5,
                intensity: Intensity::Low,
            },
        }
    }
}

/// Outcome of scoring one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub mood: Mood,
    pub confidence: f64,
    pub intensity: Intensity,
    pub scores: MoodScores,
}

/// Lowercases `text` and blanks out punctuation.
///
/// Anything that is not alphanumeric, `_` or whitespace becomes a single
/// space, so "happy!" and "happy" scan the same.
///
/// ```
/// use moodtune::algorithm::normalize;
///
/// assert_eq!(normalize("I'm SO happy!"), "i m so happy ");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c.is_alphanumeric() || c == '_' || c.is_whitespace() {
            true => c,
            false => ' ',
        })
        .collect()
}

/// Score of a single mood against already normalized text.
///
/// Each lexicon term contributes its tier weight once if it occurs anywhere
/// in the text as a substring. Repeats do not add, and nothing subtracts, so
/// adding words to a text never lowers a mood's score.
#[must_use]
pub fn score_mood(normalized: &str, mood: Mood, context: &ScoringContext) -> u32 {
    lexicon::entry(mood)
        .iter()
        .filter(|(_, term)| normalized.contains(term))
        .map(|(tier, _)| context.weights.of(tier))
        .sum()
}

/// Scores of all nine moods for raw `text`.
#[must_use]
pub fn score_text(text: &str, context: &ScoringContext) -> MoodScores {
    let normalized = normalize(text);
    Mood::ALL
        .iter()
        .map(|&mood| (mood, score_mood(&normalized, mood, context)))
        .collect()
}

/// Picks the winning mood and the runner-up score.
///
/// Iterates in priority order and only replaces the leader on a strictly
/// higher score, so ties go to the mood declared first.
fn select(scores: &MoodScores) -> (Mood, u32, u32) {
    let mut best = (Mood::ALL[0], 0u32);
    let mut runner_up = 0u32;
    for (&mood, &score) in scores {
        if score > best.1 {
            runner_up = best.1;
            best = (mood, score);
        } else if score > runner_up {
            runner_up = score;
        }
    }
    (best.0, best.1, runner_up)
}

/// Margin between the top two scores, normalized into `[0, 1]` and rounded
/// to two decimals.
#[must_use]
pub fn confidence(top: u32, runner_up: u32, smoothing: f64) -> f64 {
    let margin = f64::from(top.saturating_sub(runner_up));
    let raw = margin / (f64::from(top) + smoothing.max(f64::EPSILON));
    (raw.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

#[must_use]
pub const fn intensity_for(score: u32, thresholds: &IntensityThresholds) -> Intensity {
    match score {
        s if s >= thresholds.high => Intensity::High,
        s if s >= thresholds.medium => Intensity::Medium,
        _ => Intensity::Low,
    }
}

/// Detects the dominant mood in `text`.
///
/// Total for every input: empty text or text without any lexicon term
/// yields the context's fallback.
///
/// ```
/// use moodtune::algorithm::{detect, ScoringContext};
/// use moodtune::mood::{Intensity, Mood};
///
/// let context = ScoringContext::default();
/// let detection = detect("I'm devastated and hopeless", &context);
/// assert_eq!(detection.mood, Mood::Sad);
/// assert_eq!(detection.intensity, Intensity::High);
/// ```
#[must_use]
pub fn detect(text: &str, context: &ScoringContext) -> Detection {
    let scores = score_text(text, context);
    log::trace!("Scores for '{text}': {scores:?}");

    let (mood, top, runner_up) = select(&scores);
    if top == 0 {
        return Detection {
            mood: context.fallback.mood,
            confidence: context.fallback.confidence,
            intensity: context.fallback.intensity,
            scores,
        };
    }

    Detection {
        mood,
        confidence: confidence(top, runner_up, context.confidence_smoothing),
        intensity: intensity_for(top, &context.thresholds),
        scores,
    }
}

/// Lazily detects moods for many texts.
///
/// ```
/// use moodtune::algorithm::{batch_detect, ScoringContext};
///
/// let texts = ["so happy", "so sad"];
/// let context = ScoringContext::default();
/// let moods: Vec<_> = batch_detect(&texts, &context).map(|(_, d)| d.mood).collect();
/// assert_eq!(moods.len(), 2);
/// ```
#[must_use = "Iterator should be consumed to detect moods"]
pub fn batch_detect<'a, S: AsRef<str>>(
    texts: &'a [S],
    context: &'a ScoringContext,
) -> impl Iterator<Item = (&'a str, Detection)> + 'a {
    texts
        .iter()
        .map(move |text| (text.as_ref(), detect(text.as_ref(), context)))
}
