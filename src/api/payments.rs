//! Payment endpoints
//!
//! Extracts the already-parsed request body, hands it to the payment service
//! and maps the service's result or error back onto HTTP. Both Authorized and
//! Declined outcomes are transport-level successes; only validation failures
//! produce a Rejected body.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::AppState;
use crate::error::AppError;
use crate::payments::types::{Currency, PaymentRequest, PaymentStatus, ProcessedPayment};

/// Processed-payment shape returned by both payment endpoints.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub status: PaymentStatus,
    pub card_number_last_four: String,
    pub expiry_month: u32,
    pub expiry_year: i32,
    pub currency: Currency,
    pub amount: i64,
}

impl From<ProcessedPayment> for PaymentResponse {
    fn from(payment: ProcessedPayment) -> Self {
        Self {
            id: payment.id,
            status: payment.status,
            card_number_last_four: payment.card_number_last_four,
            expiry_month: payment.expiry_month,
            expiry_year: payment.expiry_year,
            currency: payment.currency,
            amount: payment.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RejectedPaymentResponse {
    pub status: PaymentStatus,
    pub error_message: String,
}

pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Response {
    match state.service.process_payment(request).await {
        Ok(payment) => (StatusCode::OK, Json(PaymentResponse::from(payment))).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_payment(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.service.payment(id) {
        Some(payment) => (StatusCode::OK, Json(PaymentResponse::from(payment))).into_response(),
        None => error_response(AppError::not_found(id)),
    }
}

fn error_response(err: AppError) -> Response {
    match &err {
        AppError::Validation(validation) => {
            info!("Payment rejected: {}", validation);
            (
                StatusCode::BAD_REQUEST,
                Json(RejectedPaymentResponse {
                    status: PaymentStatus::Rejected,
                    error_message: validation.to_string(),
                }),
            )
                .into_response()
        }
        AppError::NotFound { .. } => StatusCode::NOT_FOUND.into_response(),
        AppError::AcquirerTransport { .. } | AppError::AcquirerContract { .. } => {
            error!("Payment processing failed: {}", err);
            StatusCode::BAD_GATEWAY.into_response()
        }
        AppError::Internal { .. } => {
            error!("Payment processing failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
