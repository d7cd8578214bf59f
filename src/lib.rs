//! Mood detection from free text and song recommendations for the detected mood.
//!
//! Core modules:
//! - [`mood`] - The nine moods, intensity levels and per-mood audio profiles
//! - [`lexicon`] - Keyword tiers (primary, secondary, intensity) per mood
//! - [`algorithm`] - Keyword scoring, confidence and intensity
//! - [`catalog`] - Curated song catalog and the [`catalog::SongSource`] seam
//! - [`spotify`] - Optional external catalog with fallback to the curated one
//! - [`engine`] - Full analyze pipeline ([`engine::MoodTune`])
//! - [`server`] - HTTP API
//!
//! ### Supporting Modules
//!
//! - [`config`] - Server configuration from file, environment and CLI
//! - [`error`] - Library error type
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use moodtune::algorithm::{detect, ScoringContext};
//! use moodtune::mood::Mood;
//!
//! let context = ScoringContext::default();
//! let detection = detect("I'm feeling happy and excited today!", &context);
//!
//! assert_eq!(detection.mood, Mood::Happy);
//! assert!(detection.confidence > 0.0);
//!
//! let result = moodtune::engine::analyze("I feel so sad and lonely");
//! assert_eq!(result.detected_mood, Mood::Sad);
//! assert_eq!(result.recommendations.len(), 5);
//! ```
//!
//! ## Algorithm Details
//!
//! Text is lowercased and punctuation is replaced by spaces. Each lexicon term
//! found as a substring counts once, weighted by its tier:
//!
//! - **Primary**: 3 points
//! - **Secondary**: 1 point
//! - **Intensity**: 5 points
//!
//! The highest-scoring mood wins, ties going to the mood listed first. The
//! confidence is the winner's margin over the runner-up, smoothed by
//! `(top - runner_up) / (top + 1)`. Text with no hits at all resolves to
//! `calm` with confidence 0.5 and low intensity.
//!
//! ## Recommendations
//!
//! Each mood has a target valence and energy. Candidate songs for a mood are
//! ordered by their distance to that target, so the closest fit comes first.
//! The curated catalog always answers; the Spotify source falls back to it on
//! any failure.
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. Detection never fails; errors
//! only come from unknown mood labels, invalid request values and external
//! catalog failures. The binary wraps everything in `anyhow::Result`.
//!
//! ## Testing
//!
//! Run tests with:
//! ```bash
//! cargo test
//! cargo bench  # Detection and recommendation benchmarks
//! ```

pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod mood;
pub mod server;
pub mod song;
pub mod spotify;
