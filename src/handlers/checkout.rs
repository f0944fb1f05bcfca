use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::handlers::{resolve_caller, AppState};
use crate::services::service_payment::CheckoutRequest;

#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    pub service_id: String,
    pub creator_id: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub idempotency_key: Option<String>,
}

/// Lower-level checkout endpoint. Keeps the flat contract its existing
/// consumers expect: 200 with the payment url, or 500 with a bare error
/// string.
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(body): Json<CheckoutBody>,
) -> Response {
    let Some(buyer_id) = resolve_caller(&state, &headers).await else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "caller is not authenticated" })),
        )
            .into_response();
    };

    let request = CheckoutRequest {
        buyer_id,
        service_id: body.service_id,
        creator_id: body.creator_id,
        amount: body.amount,
        currency: body.currency,
        idempotency_key: body.idempotency_key,
    };

    match state.payments.create_checkout(request).await {
        Ok(outcome) => Json(json!({
            "success": true,
            "payment_url": outcome.payment_url,
            "order_id": outcome.order_id,
        }))
        .into_response(),
        Err(e) => {
            error!("Checkout failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
