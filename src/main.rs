//! # MoodTune
//!
//! Detects the mood of free text and recommends songs that fit it, either
//! from the command line or over an HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP API on port 5001
//! moodtune serve
//!
//! # Analyze text directly
//! moodtune analyze "Need some workout music, feeling energetic!"
//!
//! # Songs for a mood
//! moodtune recommend nostalgic --num-songs 3
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use moodtune::cli;
use moodtune::completion;
use moodtune::config::ServerConfig;
use moodtune::engine::{AnalysisResult, MoodTune};
use moodtune::mood::Mood;
use moodtune::server::{self, AppState};
use moodtune::song::Song;
use moodtune::spotify::SpotifyCatalog;

/// Main entry point for MoodTune.
///
/// Initializes logging, parses command-line arguments and routes commands.
/// The async runtime is only started for `serve`; every other command runs
/// synchronously.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=info moodtune serve` - Request logging
/// - `RUST_LOG=moodtune::spotify=debug moodtune search "rain"` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config_path = args.config.as_deref();

    match args.command {
        cli::Command::Serve { host, port, catalog } => {
            let mut config = ServerConfig::load(config_path)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(catalog) = catalog {
                config.catalog = catalog;
            }
            config.validate()?;

            let engine = MoodTune::from_config(&config)?;
            let state = AppState::new(config, engine);
            // The engine may own a blocking HTTP client, which must not be
            // dropped inside the runtime. `state` outlives `runtime` here.
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(server::run(state.clone()))?;
        }
        cli::Command::Analyze { text, num_songs, json } => {
            let config = ServerConfig::load(config_path)?;
            let engine = MoodTune::from_config(&config)?;
            let num_songs = num_songs.unwrap_or(config.default_num_songs);
            debug!("Analyzing {} text(s) with {} songs each", text.len(), num_songs);

            let results = engine.analyze_batch(&text, num_songs)?;

            match json {
                true => println!("{}", serde_json::to_string_pretty(&results)?),
                false => results.iter().for_each(print_analysis),
            }
        }
        cli::Command::Recommend { mood, num_songs, json } => {
            let config = ServerConfig::load(config_path)?;
            let engine = MoodTune::from_config(&config)?;
            let mood: Mood = mood.parse()?;
            let songs = engine.recommend(mood, num_songs.unwrap_or(config.default_num_songs))?;

            match json {
                true => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "mood": mood,
                        "recommendations": songs,
                    }))?
                ),
                false => {
                    println!("Songs for a {mood} mood:");
                    songs.iter().enumerate().for_each(|(i, song)| print_song(i + 1, song));
                }
            }
        }
        cli::Command::Moods => {
            let config = ServerConfig::load(config_path)?;
            debug!("Song source: {:?}", config.catalog);
            for mood in Mood::ALL {
                let profile = mood.profile();
                println!(
                    "{:<10} valence {:.2}  energy {:.2}  genres: {}",
                    mood.as_str(),
                    profile.target_valence,
                    profile.target_energy,
                    profile.seed_genres.join(", ")
                );
            }
        }
        cli::Command::Search { query, limit } => {
            let config = ServerConfig::load(config_path)?;
            let client = SpotifyCatalog::new(config.spotify)?;
            if !client.has_credentials() {
                anyhow::bail!("Search needs SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET to be set");
            }
            info!("Searching external catalog for: {query}");
            let songs = client
                .search_tracks(&query, limit)
                .with_context(|| format!("Search for '{query}' failed"))?;
            match songs.is_empty() {
                true => println!("No tracks found for '{query}'"),
                false => songs.iter().enumerate().for_each(|(i, song)| print_song(i + 1, song)),
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
        cli::Command::CompletionEnhanced { shell } => match shell {
            cli::Shell::Bash => print!("{}", completion::enhanced_bash_completion()),
            cli::Shell::Fish => print!("{}", completion::enhanced_fish_completion()),
            _ => anyhow::bail!("Enhanced completions only supported for bash and fish"),
        },
        cli::Command::CompleteMoods => {
            completion::print_mood_completions();
        }
    }

    Ok(())
}

fn print_analysis(result: &AnalysisResult) {
    println!("\"{}\"", result.user_input);
    println!(
        "  Mood: {} (confidence {:.2}, intensity {})",
        result.detected_mood, result.confidence, result.intensity
    );
    let hits: Vec<String> = result
        .emotion_scores
        .iter()
        .filter(|(_, score)| **score > 0)
        .map(|(mood, score)| format!("{mood}={score}"))
        .collect();
    if !hits.is_empty() {
        println!("  Scores: {}", hits.join(", "));
    }
    result
        .recommendations
        .iter()
        .enumerate()
        .for_each(|(i, song)| print_song(i + 1, song));
    println!();
}

fn print_song(position: usize, song: &Song) {
    let year = song.year.map(|y| format!(" ({y})")).unwrap_or_default();
    let genre = song.genre.as_deref().map(|g| format!(" [{g}]")).unwrap_or_default();
    println!("  {position:>2}. {} - {}{year}{genre}", song.title, song.artist);
}
