//! HTTP routes for the prediction API.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use crate::error::PredictError;
use crate::model::features::{MatchupFeatures, TeamFeatures};
use crate::model::{ModelInfo, TrainedModel};
use crate::predict::elo::deserialize_home;
use crate::predict::{Home, Matchup};

#[derive(Clone)]
pub struct AppState {
    /// `None` when the service was started without an artifact
    pub model: Option<Arc<TrainedModel>>,
    pub home_bonus: f64,
    pub default_best_of: i64,
}

impl AppState {
    fn model(&self) -> Result<&TrainedModel, PredictError> {
        self.model
            .as_deref()
            .ok_or_else(|| PredictError::not_found("no trained model is loaded"))
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

/// Build the Axum router for the prediction API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(healthz_handler))
        .route("/predict/elo", post(elo_handler))
        .route("/predict/series", post(series_handler))
        .route("/predict/model", post(model_handler))
        .route("/model/info", get(model_info_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

fn reject(err: PredictError) -> (StatusCode, String) {
    let status = match err {
        PredictError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        PredictError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!("Rejecting request with {}: {}", status, err);
    (status, err.to_string())
}

// ── Requests / responses ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EloRequest {
    pub rating_a: f64,
    pub rating_b: f64,
    /// "A", "B" or "none"; missing means A, `null` means neutral
    #[serde(default, deserialize_with = "deserialize_home")]
    pub home: Home,
    pub home_bonus: Option<f64>,
    pub best_of: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EloResponse {
    #[serde(flatten)]
    pub matchup: Matchup,
    pub home: Home,
    pub home_bonus: f64,
}

#[derive(Debug, Deserialize)]
pub struct SeriesRequest {
    pub p_game: f64,
    pub best_of: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ModelRequest {
    #[serde(default)]
    pub team_a: TeamFeatures,
    #[serde(default)]
    pub team_b: TeamFeatures,
    pub best_of: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ModelResponse {
    #[serde(flatten)]
    pub matchup: Matchup,
    pub features_used: MatchupFeatures,
    pub expected: Vec<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /
async fn index_handler() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "routes": [
            "GET /healthz",
            "POST /predict/elo",
            "POST /predict/series",
            "POST /predict/model",
            "GET /model/info",
        ],
    }))
}

/// GET /healthz
async fn healthz_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// POST /predict/elo
async fn elo_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EloRequest>,
) -> ApiResult<EloResponse> {
    let home_bonus = req.home_bonus.unwrap_or(state.home_bonus);
    let best_of = req.best_of.unwrap_or(state.default_best_of);
    let matchup = Matchup::from_ratings(req.rating_a, req.rating_b, home_bonus, req.home, best_of)
        .map_err(reject)?;
    debug!(
        "Elo {} vs {} (home {:?}) → game {:.4}, series {:.4}",
        req.rating_a, req.rating_b, req.home, matchup.p_game_a, matchup.p_series_a
    );
    Ok(Json(EloResponse {
        matchup,
        home: req.home,
        home_bonus,
    }))
}

/// POST /predict/series
async fn series_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeriesRequest>,
) -> ApiResult<Matchup> {
    let best_of = req.best_of.unwrap_or(state.default_best_of);
    Matchup::from_game_probability(req.p_game, best_of)
        .map(Json)
        .map_err(reject)
}

/// POST /predict/model
async fn model_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ModelRequest>,
) -> ApiResult<ModelResponse> {
    let model = state.model().map_err(reject)?;
    let best_of = req.best_of.unwrap_or(state.default_best_of);
    let prediction = model.predict(&req.team_a, &req.team_b);
    let matchup = Matchup::from_game_probability(prediction.p_win, best_of).map_err(reject)?;
    Ok(Json(ModelResponse {
        matchup,
        features_used: prediction.features_used,
        expected: prediction.expected,
    }))
}

/// GET /model/info
async fn model_info_handler(State(state): State<Arc<AppState>>) -> ApiResult<ModelInfo> {
    state.model().map(|m| Json(m.info())).map_err(reject)
}
