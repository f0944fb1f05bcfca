use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::handlers::{resolve_caller, AppState};

#[derive(Debug, Deserialize)]
pub struct ServicePaymentBody {
    pub service_id: String,
}

pub async fn create_service_payment(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(body): Json<ServicePaymentBody>,
) -> Response {
    let caller = resolve_caller(&state, &headers).await;
    info!("Service payment requested for {}", body.service_id);

    match state
        .payments
        .create_service_payment(caller, &body.service_id)
        .await
    {
        Ok(payment) => Json(json!({
            "success": true,
            "payment_url": payment.payment_url,
            "order_id": payment.order_id,
        }))
        .into_response(),
        Err(e) => e.into_response(),
    }
}
