use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::app::config::Config;

/// Internal charge request handed to an adapter. Built once by the
/// orchestrator after the order row exists; adapters never mutate orders.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub order_id: String,
    pub amount_minor: u64,
    pub currency: String,
    pub buyer_id: String,
    pub creator_id: String,
}

/// Successful provider outcome. `payment_url` stays optional here: a 2xx
/// without the URL is a contract defect the orchestrator classifies, not
/// something the adapter papers over.
#[derive(Debug, Clone)]
pub struct GatewayCharge {
    pub reference_id: String,
    pub payment_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayFailureKind {
    /// Missing or rejected API credential.
    AuthMisconfigured,
    /// Network failure, timeout, or provider 5xx.
    ProviderUnavailable,
    /// Provider 4xx: the request itself was bad.
    InvalidRequest,
    Unknown,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GatewayFailure {
    pub kind: GatewayFailureKind,
    pub message: String,
}

impl GatewayFailure {
    pub fn new(kind: GatewayFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Capability: given an order, produce a payment URL or a classified
/// failure. Additional providers implement this without touching the
/// orchestrator.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_charge(&self, request: &GatewayRequest) -> Result<GatewayCharge, GatewayFailure>;
}

pub struct PushinPayGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CashInResponse {
    id: String,
    #[serde(default)]
    payment_url: Option<String>,
}

impl PushinPayGateway {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.gateway_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.gateway_base_url.trim_end_matches('/').to_string(),
            api_key: config.gateway_api_key.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for PushinPayGateway {
    fn name(&self) -> &'static str {
        "pushinpay"
    }

    async fn create_charge(&self, request: &GatewayRequest) -> Result<GatewayCharge, GatewayFailure> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GatewayFailure::new(
                GatewayFailureKind::AuthMisconfigured,
                "PushinPay API key is not configured",
            )
        })?;

        let payload = serde_json::json!({
            "value": request.amount_minor,
            "currency": request.currency,
            "external_reference": request.order_id,
        });

        let response = match self
            .client
            .post(format!("{}/api/pix/cashIn", self.base_url))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Gateway unreachable for order {}: {}", request.order_id, e);
                return Err(GatewayFailure::new(
                    GatewayFailureKind::ProviderUnavailable,
                    e.to_string(),
                ));
            }
        };

        let status = response.status();
        if status.is_success() {
            match response.json::<CashInResponse>().await {
                Ok(body) => {
                    info!(
                        "Gateway accepted charge for order {} (reference {})",
                        request.order_id, body.id
                    );
                    Ok(GatewayCharge {
                        reference_id: body.id,
                        payment_url: body.payment_url,
                    })
                }
                Err(e) => Err(GatewayFailure::new(
                    GatewayFailureKind::Unknown,
                    format!("undecodable gateway response: {}", e),
                )),
            }
        } else {
            let message = response.text().await.unwrap_or_default();
            warn!(
                "Gateway refused charge for order {}: HTTP {}",
                request.order_id, status
            );
            Err(classify_status(status, message))
        }
    }
}

fn classify_status(status: StatusCode, message: String) -> GatewayFailure {
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayFailureKind::AuthMisconfigured,
        s if s.is_server_error() => GatewayFailureKind::ProviderUnavailable,
        s if s.is_client_error() => GatewayFailureKind::InvalidRequest,
        _ => GatewayFailureKind::Unknown,
    };
    let message = if message.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        message
    };
    GatewayFailure { kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::tests::test_config;

    #[test]
    fn classifies_statuses_into_failure_kinds() {
        let failure = classify_status(StatusCode::UNAUTHORIZED, String::new());
        assert_eq!(failure.kind, GatewayFailureKind::AuthMisconfigured);

        let failure = classify_status(StatusCode::BAD_GATEWAY, "gateway timeout".to_string());
        assert_eq!(failure.kind, GatewayFailureKind::ProviderUnavailable);
        assert_eq!(failure.message, "gateway timeout");

        let failure = classify_status(StatusCode::UNPROCESSABLE_ENTITY, String::new());
        assert_eq!(failure.kind, GatewayFailureKind::InvalidRequest);
        assert_eq!(failure.message, "HTTP 422 Unprocessable Entity");
    }

    #[tokio::test]
    async fn missing_api_key_is_a_configuration_failure() {
        let mut config = test_config();
        config.gateway_api_key = None;
        let gateway = PushinPayGateway::new(&config);

        let request = GatewayRequest {
            order_id: "ord_1".to_string(),
            amount_minor: 1990,
            currency: "BRL".to_string(),
            buyer_id: "buyer_1".to_string(),
            creator_id: "creator_1".to_string(),
        };

        let failure = gateway.create_charge(&request).await.unwrap_err();
        assert_eq!(failure.kind, GatewayFailureKind::AuthMisconfigured);
        assert!(failure.message.contains("API key"));
    }
}
