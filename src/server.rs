//! HTTP surface: the page, its layout, and the callback endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::data::filter::ControlValues;
use crate::state::DashboardState;
use crate::ui::chart::ChartSpec;
use crate::ui::panels::{Layout, INDEX_HTML};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no callback registered for output '{0}'")]
    UnknownOutput(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::UnknownOutput(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Response of a callback: the typed chart and its Plotly figure.
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub output: String,
    pub chart: ChartSpec,
    pub figure: Value,
}

pub fn router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/layout", get(layout))
        .route("/api/callbacks/:output", post(callback))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<Arc<DashboardState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "records": state.table.len(),
    }))
}

async fn layout(State(state): State<Arc<DashboardState>>) -> Json<Layout> {
    Json(state.layout.clone())
}

async fn callback(
    State(state): State<Arc<DashboardState>>,
    Path(output): Path<String>,
    Json(values): Json<ControlValues>,
) -> Result<Json<CallbackResponse>, ApiError> {
    let Some(chart) = state.dispatch(&output, &values) else {
        log::warn!("Callback requested for unknown output '{output}'");
        return Err(ApiError::UnknownOutput(output));
    };
    let figure = chart.to_figure();
    Ok(Json(CallbackResponse {
        output,
        chart,
        figure,
    }))
}
