//! Voice routes and handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{ApiError, AppState};
use crate::config::Voice;
use crate::preference::PreferenceError;

/// Create all routes.
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().merge(voice_routes()).nest("/api", voice_routes())
}

fn voice_routes() -> Router<Arc<AppState>> {
    Router::new().route("/voice", get(get_voice).post(set_voice))
}

/// Response to `GET /voice`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceStatus {
    pub success: bool,
    pub voice: Voice,
    pub available_voices: Vec<Voice>,
}

/// Response to a successful `POST /voice`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceUpdated {
    pub success: bool,
    pub voice: Voice,
}

/// Current voice plus the full catalogue.
pub async fn get_voice(State(state): State<Arc<AppState>>) -> Result<Json<VoiceStatus>, ApiError> {
    let store = state.store.clone();
    let voice = tokio::task::spawn_blocking(move || store.load())
        .await
        .map_err(|e| ApiError::Internal(format!("Voice lookup task failed: {}", e)))?;

    Ok(Json(VoiceStatus { success: true, voice, available_voices: Voice::ALL.to_vec() }))
}

/// Validate and store the voice named in the request body.
pub async fn set_voice(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<VoiceUpdated>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    let name = requested_voice(&body)?;
    let voice = Voice::from_name(name).ok_or_else(|| PreferenceError::invalid_voice(name))?;

    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.save(voice))
        .await
        .map_err(|e| ApiError::Internal(format!("Voice update task failed: {}", e)))??;

    info!(voice = %voice, "Voice updated over HTTP");
    Ok(Json(VoiceUpdated { success: true, voice }))
}

/// Extract the `voice` field. Missing, null and empty values count as not provided.
fn requested_voice(body: &Value) -> Result<&str, ApiError> {
    match body.get("voice") {
        Some(Value::String(name)) if !name.is_empty() => Ok(name.as_str()),
        None | Some(Value::Null) | Some(Value::String(_)) => Err(ApiError::BadRequest("Parameter 'voice' is required".to_string())),
        Some(other) => Err(PreferenceError::invalid_voice(other.to_string()).into()),
    }
}
