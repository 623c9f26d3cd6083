//! HTTP front end for the sentiment model.
//!
//! Routes:
//!
//! - `GET /health` liveness probe
//! - `POST /normalize` with `{"comment": "..."}`
//! - `POST /predict` with `{"comment": "..."}`
//! - `POST /` with a `comment` form field, for plain HTML forms

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::ServerConfig;
use crate::error::{Result, SentiscopeError};
use crate::ml::model::SentimentModel;
use crate::ml::types::Prediction;

/// Shared handler state.
pub type AppState = Arc<SentimentModel>;

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizeResponse {
    pub normalized: String,
}

/// Error body returned by every handler.
#[derive(Debug)]
pub struct ApiError(SentiscopeError);

impl From<SentiscopeError> for ApiError {
    fn from(err: SentiscopeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            log::error!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

/// Build the router over a loaded model.
pub fn router(model: AppState) -> Router {
    Router::new()
        .route("/", post(predict_form))
        .route("/health", get(health))
        .route("/normalize", post(normalize))
        .route("/predict", post(predict))
        .with_state(model)
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve(model: AppState, config: &ServerConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(model)).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn normalize(
    State(model): State<AppState>,
    Json(request): Json<CommentRequest>,
) -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        normalized: model.normalize(&request.comment),
    })
}

async fn predict(
    State(model): State<AppState>,
    Json(request): Json<CommentRequest>,
) -> std::result::Result<Json<Prediction>, ApiError> {
    run_prediction(model, request.comment).await
}

async fn predict_form(
    State(model): State<AppState>,
    Form(request): Form<CommentRequest>,
) -> std::result::Result<Json<Prediction>, ApiError> {
    run_prediction(model, request.comment).await
}

async fn run_prediction(
    model: AppState,
    comment: String,
) -> std::result::Result<Json<Prediction>, ApiError> {
    // Normalization and scoring are CPU-bound.
    let prediction = tokio::task::spawn_blocking(move || model.predict(&comment))
        .await
        .map_err(|e| SentiscopeError::model(format!("prediction task failed: {e}")))??;

    Ok(Json(prediction))
}
