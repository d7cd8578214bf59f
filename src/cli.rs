//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for MoodTune using Clap
//! derive macros.
//!
//! ## Commands
//!
//! - `serve`: Run the HTTP API
//! - `analyze`: Detect the mood of one or more texts and suggest songs
//! - `recommend`: Suggest songs for a mood
//! - `moods`: List the available moods
//! - `search`: Search the external catalog for tracks
//!
//! ## Examples
//!
//! ```bash
//! moodtune serve --port 5001
//! moodtune analyze "I'm feeling happy and excited today!"
//! moodtune recommend calm --num-songs 3
//! ```

use crate::config::CatalogBackend;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "moodtune")]
#[command(about = "MoodTune: mood detection from free text and curated song recommendations")]
#[command(version)]
pub struct Args {
    /// Path to a JSON config file
    ///
    /// Defaults to the platform config directory (moodtune/config.json)
    /// when that file exists.
    #[arg(long, global = true, env = "MOODTUNE_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    ///
    /// Serves POST /analyze, GET /moods and GET /recommend/<mood>.
    Serve {
        /// Address to bind
        #[arg(long, env = "MOODTUNE_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, env = "MOODTUNE_PORT")]
        port: Option<u16>,

        /// Song source backing recommendations
        #[arg(long, value_enum)]
        catalog: Option<CatalogBackend>,
    },

    /// Detect the mood of text and suggest songs
    ///
    /// Each argument is analyzed separately.
    Analyze {
        /// Text describing how you feel
        #[arg(required = true)]
        text: Vec<String>,

        /// Number of songs to suggest per text [default: from config, 5]
        #[arg(short, long)]
        num_songs: Option<usize>,

        /// Print the raw JSON result instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Suggest songs for a mood
    Recommend {
        /// One of: happy, sad, energetic, calm, romantic, angry, anxious, nostalgic, confident
        #[arg(value_hint = clap::ValueHint::Other)]
        mood: String,

        /// Number of songs to suggest [default: from config, 5]
        #[arg(short, long)]
        num_songs: Option<usize>,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// List available moods with their audio profiles
    Moods,

    /// Search the external catalog for tracks
    ///
    /// Requires SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET.
    Search {
        /// Free-text query
        query: String,

        /// Maximum number of tracks
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// Generate shell completions
    ///
    /// Usage: moodtune completion bash > ~/.local/share/bash-completion/completions/moodtune
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate enhanced completion with mood name completion
    ///
    /// Usage: moodtune completion-enhanced fish > ~/.config/fish/completions/moodtune.fish
    CompletionEnhanced {
        /// Shell to generate enhanced completions for (currently bash and fish supported)
        shell: Shell,
    },

    /// List mood names for completion (hidden command)
    #[command(hide = true)]
    CompleteMoods,
}
