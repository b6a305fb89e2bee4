//! Payment orchestration
//!
//! Composes validation, normalization, the single acquirer call and the
//! response-to-status mapping. A submission either fails before the bank is
//! contacted (rejected, nothing persisted), fails at the bank (surfaced,
//! nothing persisted) or lands in the store as Authorized or Declined.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::payments::acquirer::{BankClient, BankPaymentRequest};
use crate::payments::normalize;
use crate::payments::types::{
    AuthorizationResult, NormalizedPayment, PaymentRequest, PaymentStatus, ProcessedPayment,
};
use crate::payments::validation;
use crate::store::PaymentStore;

pub struct PaymentService {
    bank: Arc<dyn BankClient>,
    store: Arc<PaymentStore>,
}

impl PaymentService {
    pub fn new(bank: Arc<dyn BankClient>, store: Arc<PaymentStore>) -> Self {
        Self { bank, store }
    }

    /// Runs one submission through the pipeline:
    /// validate → normalize → authorize → store.
    ///
    /// Validation failures reject the request before the acquirer is ever
    /// contacted. Acquirer failures abort the submission with nothing
    /// persisted; only Authorized and Declined outcomes are stored.
    pub async fn process_payment(&self, request: PaymentRequest) -> AppResult<ProcessedPayment> {
        validation::validate(&request, Utc::now())?;
        let payment = normalize::normalize(&request)?;

        let result = self.authorize(&payment).await?;

        let id = self.store.add(&payment, &result);
        info!(
            "Payment {} stored: status={:?} amount={} currency={}",
            id, result.status, payment.amount, payment.currency
        );

        self.store
            .get(id)
            .ok_or_else(|| AppError::internal(format!("stored payment '{id}' was not readable")))
    }

    /// Looks up a previously processed payment. `None` is a normal outcome.
    pub fn payment(&self, id: Uuid) -> Option<ProcessedPayment> {
        self.store.get(id)
    }

    async fn authorize(&self, payment: &NormalizedPayment) -> AppResult<AuthorizationResult> {
        let request = BankPaymentRequest::from_payment(payment);
        let response = self.bank.post_payment(&request).await?;

        // A 2xx answer without the flag is an upstream defect. Refuse to
        // guess instead of defaulting to Declined.
        let Some(authorized) = response.authorized else {
            error!("Acquirer response did not contain an authorized flag");
            return Err(AppError::acquirer_contract(
                "authorized flag missing from acquirer response",
            ));
        };

        let status = if authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        };
        info!("Acquirer answered: authorized={}", authorized);

        Ok(AuthorizationResult {
            status,
            authorization_code: response.authorization_code,
        })
    }
}
