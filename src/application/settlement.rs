use crate::domain::booking::BookingRecord;
use crate::domain::card::{CardDetails, Violation};
use crate::domain::checklist::ChecklistSummary;
use crate::domain::cost::CostBreakdown;
use crate::domain::ports::BookingStoreBox;
use crate::domain::trip::{Customer, TripContext, Vehicle};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Mpesa,
    Cash,
}

impl PaymentMethod {
    /// Only card payments carry locally validated instrument details.
    pub fn requires_card_details(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

/// Everything the engine needs for one settlement attempt: the read-only
/// trip snapshot, the quote shown to the user, and the payment intent.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub trip: TripContext,
    pub vehicle: Option<Vehicle>,
    pub cost: CostBreakdown,
    pub method: PaymentMethod,
    pub card: Option<CardDetails>,
    pub checklist: Option<ChecklistSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// Card fields were malformed or expired; nothing reached the store.
    Validation(Vec<Violation>),
    /// The store rejected the record or the call itself failed.
    Persistence,
}

/// Terminal result of one settlement attempt.
///
/// Failures are reported as data so the caller always receives an outcome
/// and the engine returns to idle; nothing here is thrown.
#[derive(Debug)]
pub enum SettlementOutcome {
    Succeeded { record: BookingRecord },
    Failed { reason: FailureReason, message: String },
    /// A submission was already in flight; this trigger was ignored.
    AlreadyInFlight,
}

/// Orchestrates validation, booking assembly and persistence for a payment.
///
/// One attempt runs at a time: the submission lock makes a second pay action
/// a no-op while the first is still in flight, so a double-tap can never
/// create two bookings.
pub struct SettlementEngine {
    store: BookingStoreBox,
    submission: Mutex<()>,
}

impl SettlementEngine {
    pub fn new(store: BookingStoreBox) -> Self {
        Self {
            store,
            submission: Mutex::new(()),
        }
    }

    /// Runs one settlement attempt to completion.
    ///
    /// The record is assembled in full before the store is invoked, and the
    /// store is invoked at most once per attempt. Store failures of any kind
    /// are normalized into a `Failed` outcome.
    pub async fn settle(&self, request: CheckoutRequest) -> SettlementOutcome {
        let Ok(_guard) = self.submission.try_lock() else {
            tracing::debug!("settlement already in flight, ignoring pay action");
            return SettlementOutcome::AlreadyInFlight;
        };

        if request.method.requires_card_details() {
            let violations = match &request.card {
                Some(card) => card.validate(),
                None => vec![Violation::MissingDetails],
            };
            if !violations.is_empty() {
                let message = violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::debug!(%message, "card validation failed");
                return SettlementOutcome::Failed {
                    reason: FailureReason::Validation(violations),
                    message,
                };
            }
        }

        let record = BookingRecord::assemble(
            &request.customer,
            &request.trip,
            request.vehicle.as_ref(),
            &request.cost,
            request.checklist,
        );

        tracing::debug!(customer = %record.customer_id, total = %record.total_price, "submitting booking");
        match self.store.insert(record.clone()).await {
            Ok(ack) if ack.success => SettlementOutcome::Succeeded {
                record: ack.record.unwrap_or(record),
            },
            Ok(ack) => {
                let message = ack
                    .message
                    .unwrap_or_else(|| "Booking was not accepted".to_string());
                tracing::warn!(%message, "booking rejected by store");
                SettlementOutcome::Failed {
                    reason: FailureReason::Persistence,
                    message,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking store call failed");
                SettlementOutcome::Failed {
                    reason: FailureReason::Persistence,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Consumes the engine and returns every persisted booking.
    pub async fn into_bookings(self) -> Result<Vec<BookingRecord>> {
        self.store.all().await
    }
}
