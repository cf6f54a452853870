use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    message: String,
    mock_data: bool,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let message = if state.mock_data {
        "Server is running on in-memory data"
    } else {
        "Server is running"
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        message: message.to_string(),
        mock_data: state.mock_data,
    })
}
