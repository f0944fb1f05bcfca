use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::models::order::PaymentStatus;
use crate::services::gateway::{GatewayFailure, GatewayFailureKind};
use crate::utils::money::MoneyError;

/// Stable error classification surfaced to callers as the `error` field of
/// the `{success, error, details}` response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotAuthenticated,
    ServiceNotFound,
    ConfigurationError,
    GatewayError,
    NetworkError,
    MalformedGatewayResponse,
    PersistenceError,
    Unknown,
}

impl ErrorKind {
    /// Fallback classifier for raw, unstructured provider messages. The
    /// primary path classifies by `GatewayFailureKind`; this only runs when
    /// all we have is human-readable text. "API key" is checked before
    /// "gateway" so a missing-credential message mentioning both still maps
    /// to a configuration problem.
    pub fn classify(raw: &str) -> ErrorKind {
        let message = raw.trim().to_ascii_lowercase();
        if message.is_empty() {
            ErrorKind::NetworkError
        } else if message.contains("not authenticated") {
            ErrorKind::NotAuthenticated
        } else if message.contains("not found") {
            ErrorKind::ServiceNotFound
        } else if message.contains("api key") {
            ErrorKind::ConfigurationError
        } else if message.contains("gateway") {
            ErrorKind::GatewayError
        } else {
            ErrorKind::Unknown
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::ServiceNotFound => StatusCode::NOT_FOUND,
            ErrorKind::ConfigurationError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::GatewayError => StatusCode::BAD_GATEWAY,
            ErrorKind::NetworkError => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::MalformedGatewayResponse => StatusCode::BAD_GATEWAY,
            ErrorKind::PersistenceError => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Storage-layer failures. Surfaced to callers as `persistence_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("illegal status transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("invalid request: {0}")]
    InvalidInput(String),
    #[error("caller is not authenticated")]
    NotAuthenticated,
    #[error("service not found or not purchasable: {0}")]
    ServiceNotFound(String),
    #[error("payment gateway credential is not configured")]
    Configuration(String),
    #[error("payment gateway rejected the charge")]
    Gateway(String),
    #[error("could not reach the payment gateway")]
    Network(String),
    #[error("gateway accepted the charge but returned no payment url")]
    MalformedGatewayResponse { reference: String },
    #[error("order storage failed")]
    Persistence(#[from] StoreError),
    #[error("payment failed for an unknown reason")]
    Unknown(String),
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::InvalidInput(_) => ErrorKind::InvalidInput,
            PaymentError::NotAuthenticated => ErrorKind::NotAuthenticated,
            PaymentError::ServiceNotFound(_) => ErrorKind::ServiceNotFound,
            PaymentError::Configuration(_) => ErrorKind::ConfigurationError,
            PaymentError::Gateway(_) => ErrorKind::GatewayError,
            PaymentError::Network(_) => ErrorKind::NetworkError,
            PaymentError::MalformedGatewayResponse { .. } => ErrorKind::MalformedGatewayResponse,
            PaymentError::Persistence(_) => ErrorKind::PersistenceError,
            PaymentError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Technical context for logs and the `details` field. Never conflated
    /// with the short message callers see.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            PaymentError::InvalidInput(detail)
            | PaymentError::Configuration(detail)
            | PaymentError::Gateway(detail)
            | PaymentError::Network(detail)
            | PaymentError::ServiceNotFound(detail)
            | PaymentError::Unknown(detail) => Some(json!({ "detail": detail })),
            PaymentError::MalformedGatewayResponse { reference } => {
                Some(json!({ "gateway_reference": reference }))
            }
            PaymentError::Persistence(source) => Some(json!({ "detail": source.to_string() })),
            PaymentError::NotAuthenticated => None,
        }
    }

    /// Structured mapping from the adapter's failure kinds. Unknown kinds
    /// fall back to message classification.
    pub fn from_gateway(failure: GatewayFailure) -> Self {
        match failure.kind {
            GatewayFailureKind::AuthMisconfigured => PaymentError::Configuration(failure.message),
            GatewayFailureKind::ProviderUnavailable | GatewayFailureKind::InvalidRequest => {
                PaymentError::Gateway(failure.message)
            }
            GatewayFailureKind::Unknown => PaymentError::from_raw_message(failure.message),
        }
    }

    pub fn from_raw_message(raw: String) -> Self {
        match ErrorKind::classify(&raw) {
            ErrorKind::NetworkError => PaymentError::Network(raw),
            ErrorKind::NotAuthenticated => PaymentError::NotAuthenticated,
            ErrorKind::ServiceNotFound => PaymentError::ServiceNotFound(raw),
            ErrorKind::ConfigurationError => PaymentError::Configuration(raw),
            ErrorKind::GatewayError => PaymentError::Gateway(raw),
            _ => PaymentError::Unknown(raw),
        }
    }
}

impl From<MoneyError> for PaymentError {
    fn from(error: MoneyError) -> Self {
        PaymentError::InvalidInput(error.to_string())
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let mut body = json!({
            "success": false,
            "error": kind,
            "message": self.to_string(),
        });
        if let Some(details) = self.details() {
            body["details"] = details;
        }
        (kind.status_code(), Json(body)).into_response()
    }
}
