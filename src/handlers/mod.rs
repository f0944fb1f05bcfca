pub mod checkout;
pub mod conversations;
pub mod metrics;
pub mod orders;
pub mod service_payments;

use axum::http::{header, HeaderMap};
use std::sync::Arc;

use crate::services::identity::{IdentityResolver, UserId};
use crate::services::ServicePaymentService;

#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<ServicePaymentService>,
    pub identity: Arc<dyn IdentityResolver>,
}

/// Resolves the caller from the request's bearer credential. `None` means
/// the request is anonymous; every operation decides for itself whether
/// that is acceptable.
pub(crate) async fn resolve_caller(state: &AppState, headers: &HeaderMap) -> Option<UserId> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    state.identity.resolve(token).await
}
