use axum::{extract::State, response::Json};

use crate::handlers::AppState;

pub async fn get_metrics(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.payments.metrics_snapshot())
}
