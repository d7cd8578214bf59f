//! HTTP route handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::AppError;
use super::AppState;
use crate::engine::AnalysisResult;
use crate::error::Error;
use crate::mood::Mood;
use crate::song::Song;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body of `POST /analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub num_songs: Option<i64>,
}

/// Query of `GET /recommend/:mood`
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub num_songs: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub song_source: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MoodsResponse {
    pub moods: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub mood: Mood,
    pub recommendations: Vec<Song>,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("/analyze", "POST - Analyze mood and get recommendations"),
        ("/moods", "GET - Get all available moods"),
        ("/recommend/<mood>", "GET - Get recommendations for a specific mood"),
        ("/health", "GET - Health check"),
    ]);
    Json(ServiceInfo {
        status: "running",
        service: "MoodTune API",
        version: VERSION,
        song_source: state.engine.source_name(),
        endpoints,
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// POST /analyze
///
/// Malformed JSON, a non-string `text` and a non-integer `num_songs` are all
/// rejected with 400 before any scoring runs.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    let text = request
        .text
        .ok_or_else(|| Error::Validation("Missing required field: text".to_string()))?;
    let num_songs = validate_num_songs(request.num_songs, &state)?;

    info!("Analyzing mood for text: {}...", preview(&text));
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || engine.analyze(&text, num_songs)).await??;
    info!(
        "Detected mood: {} (confidence: {})",
        result.detected_mood, result.confidence
    );

    Ok(Json(result))
}

/// GET /moods
pub async fn moods(State(state): State<AppState>) -> Json<MoodsResponse> {
    Json(MoodsResponse {
        moods: state.engine.moods(),
    })
}

/// GET /recommend/:mood
pub async fn recommend(
    State(state): State<AppState>,
    Path(label): Path<String>,
    params: Result<Query<RecommendParams>, QueryRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::BadRequest(format!("Invalid query: {}", e.body_text())))?;
    let num_songs = validate_num_songs(params.num_songs, &state)?;
    let mood: Mood = label.parse()?;

    let engine = state.engine.clone();
    let recommendations = tokio::task::spawn_blocking(move || engine.recommend(mood, num_songs)).await??;

    Ok(Json(RecommendResponse { mood, recommendations }))
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("The requested endpoint does not exist".to_string())
}

/// Applies the configured default and bounds to a requested song count.
fn validate_num_songs(requested: Option<i64>, state: &AppState) -> Result<usize, AppError> {
    let max = state.config.max_num_songs;
    match requested {
        None => Ok(state.config.default_num_songs),
        Some(n) if n >= 1 && n as u64 <= max as u64 => Ok(n as usize),
        Some(_) => Err(Error::Validation(format!("num_songs must be an integer between 1 and {max}")).into()),
    }
}

/// First 50 characters, for logs.
fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
