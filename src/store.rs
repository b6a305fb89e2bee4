//! In-memory payment store
//!
//! The only shared mutable state in the process. Entries are inserted once
//! under a fresh identifier and never updated or deleted afterwards.

use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::payments::masking;
use crate::payments::types::{AuthorizationResult, NormalizedPayment, ProcessedPayment};

/// Concurrency-safe, append-only map of processed payments.
///
/// Constructed once per process and handed to the orchestrator explicitly;
/// there is no ambient global instance.
#[derive(Debug, Default)]
pub struct PaymentStore {
    payments: RwLock<HashMap<Uuid, ProcessedPayment>>,
}

impl PaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and inserts the `ProcessedPayment` record for an authorized or
    /// declined submission, returning its freshly assigned identifier.
    ///
    /// The card number is reduced to its last four digits on the way in and
    /// the CVV is dropped entirely; the stored type cannot hold either.
    pub fn add(&self, payment: &NormalizedPayment, result: &AuthorizationResult) -> Uuid {
        let record = ProcessedPayment {
            id: Uuid::new_v4(),
            card_number_last_four: masking::last_four(&payment.card_number),
            expiry_month: payment.expiry_month,
            expiry_year: payment.expiry_year,
            currency: payment.currency,
            amount: payment.amount,
            status: result.status,
            authorization_code: result.authorization_code.clone(),
        };
        let id = record.id;

        let mut payments = self.payments.write().expect("payment store lock poisoned");
        payments.insert(id, record);
        id
    }

    /// Exact-match lookup. `None` means the identifier was never stored,
    /// which is a normal outcome rather than an error.
    pub fn get(&self, id: Uuid) -> Option<ProcessedPayment> {
        let payments = self.payments.read().expect("payment store lock poisoned");
        payments.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.payments.read().expect("payment store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
