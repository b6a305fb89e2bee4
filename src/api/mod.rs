//! HTTP boundary
//!
//! Router assembly and the shared application state handed to every handler.

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod payments;

use crate::payments::service::PaymentService;

/// Shared state for all handlers. Cheap to clone; the service is Arc-backed.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PaymentService>,
    pub environment: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/payments", post(payments::create_payment))
        .route("/payments/:id", get(payments::get_payment))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
