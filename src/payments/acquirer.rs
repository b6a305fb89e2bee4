//! Acquiring bank client
//!
//! Wire types and the HTTP client for the acquirer's `/payments` endpoint.
//! One request goes out per authorization attempt; there is no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::payments::types::NormalizedPayment;

/// Acquirer endpoint configuration.
#[derive(Debug, Clone)]
pub struct AcquirerConfig {
    /// Base URL of the acquiring bank API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AcquirerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Authorization request as the acquirer expects it on the wire.
///
/// The expiry date is a single `"MM/YYYY"` field with the month always
/// zero-padded to two digits. The CVV is the caller's string, untouched, so
/// leading zeros survive serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankPaymentRequest {
    pub card_number: String,
    pub expiry_date: String,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

impl BankPaymentRequest {
    pub fn from_payment(payment: &NormalizedPayment) -> Self {
        Self {
            card_number: payment.card_number.clone(),
            expiry_date: format!("{:02}/{}", payment.expiry_month, payment.expiry_year),
            currency: payment.currency.code().to_string(),
            amount: payment.amount,
            cvv: payment.cvv.clone(),
        }
    }
}

/// Acquirer answer as it appears on the wire.
///
/// `authorized` is kept tri-state: a missing or null flag is not a legal
/// "unknown" outcome and the caller must refuse to guess.
#[derive(Debug, Clone, Deserialize)]
pub struct BankPaymentResponse {
    #[serde(default)]
    pub authorized: Option<bool>,
    #[serde(default)]
    pub authorization_code: Option<String>,
}

/// Transport to the acquiring bank.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankClient: Send + Sync {
    /// Posts one authorization request and parses the bank's answer.
    ///
    /// Network failures and non-success HTTP statuses surface as
    /// `AppError::AcquirerTransport`; contract interpretation is left to the
    /// caller.
    async fn post_payment(&self, request: &BankPaymentRequest) -> AppResult<BankPaymentResponse>;
}

/// `BankClient` backed by reqwest.
pub struct HttpBankClient {
    config: AcquirerConfig,
    client: Client,
}

impl HttpBankClient {
    pub fn new(config: AcquirerConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl BankClient for HttpBankClient {
    async fn post_payment(&self, request: &BankPaymentRequest) -> AppResult<BankPaymentResponse> {
        let url = format!("{}/payments", self.config.base_url);
        info!("Posting authorization request to {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("Acquirer returned non-success status {}", status);
            return Err(AppError::acquirer_transport(format!(
                "acquirer responded with HTTP {status}"
            )));
        }

        let parsed = response
            .json::<BankPaymentResponse>()
            .await
            .map_err(|e| AppError::acquirer_transport(format!("invalid response body: {e}")))?;

        Ok(parsed)
    }
}
