use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::handlers::AppState;

pub async fn get_order(State(state): State<AppState>, Path(order_id): Path<String>) -> Response {
    match state.payments.get_order(&order_id).await {
        Ok(Some(order)) => Json(order).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => e.into_response(),
    }
}
