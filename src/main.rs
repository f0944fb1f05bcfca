mod app;
mod errors;
mod handlers;
mod models;
mod services;
mod utils;

use app::config::Config;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use handlers::{checkout, conversations, metrics, orders, service_payments, AppState};
use services::catalog::InMemoryCatalog;
use services::conversation_store::InMemoryConversationStore;
use services::gateway::PushinPayGateway;
use services::identity::InMemorySessions;
use services::order_store::InMemoryOrderStore;
use services::ServicePaymentService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    info!("Starting creatorpay backend on port {}", config.server_port);
    if config.gateway_api_key.is_none() {
        warn!("PUSHINPAY_API_KEY is not set; charges will fail with a configuration error");
    }

    let gateway = Arc::new(PushinPayGateway::new(&config));
    let order_store = Arc::new(InMemoryOrderStore::new());
    let conversation_store = Arc::new(InMemoryConversationStore::new());
    let catalog = Arc::new(InMemoryCatalog::new());
    let sessions = Arc::new(InMemorySessions::new());

    let payments = Arc::new(ServicePaymentService::new(
        order_store,
        conversation_store,
        catalog,
        gateway,
        &config,
    ));

    let state = AppState {
        payments,
        identity: sessions,
    };

    // browser checkouts come from creator pages on arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/checkout", post(checkout::create_checkout))
        .route(
            "/payments/service",
            post(service_payments::create_service_payment),
        )
        .route("/conversations", post(conversations::find_or_create))
        .route("/orders/:id", get(orders::get_order))
        .route("/metrics", get(metrics::get_metrics))
        .layer(cors)
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}
