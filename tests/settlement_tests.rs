use async_trait::async_trait;
use moveday::application::settlement::{
    CheckoutRequest, FailureReason, PaymentMethod, SettlementEngine, SettlementOutcome,
};
use moveday::domain::booking::{BookingRecord, InsertAck};
use moveday::domain::card::CardDetails;
use moveday::domain::checklist::{ChecklistItem, Priority, summarize};
use moveday::domain::cost::{CostBreakdown, PricingConfig};
use moveday::domain::ports::BookingStore;
use moveday::domain::trip::{Customer, TripContext, Vehicle};
use moveday::error::{BookingError, Result};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

fn cash_request(customer_id: &str) -> CheckoutRequest {
    let vehicle = Vehicle {
        id: 1,
        name: "Canter truck".to_string(),
        rate: dec!(14240),
    };
    CheckoutRequest {
        customer: Customer {
            id: customer_id.to_string(),
            name: "Jane Mwangi".to_string(),
        },
        trip: TripContext {
            origin: Some("Westlands".to_string()),
            destination: Some("Kilimani".to_string()),
            distance_km: Some(dec!(10)),
            duration: Some("45 min".to_string()),
            date: Some("2025-07-01".to_string()),
            time: Some("09:30".to_string()),
        },
        cost: CostBreakdown::compute(vehicle.rate, dec!(10), &PricingConfig::default()),
        vehicle: Some(vehicle),
        method: PaymentMethod::Cash,
        card: None,
        checklist: None,
    }
}

/// A store whose insert blocks until released, for exercising the
/// single-in-flight submission lock.
#[derive(Clone, Default)]
struct GatedStore {
    calls: Arc<AtomicUsize>,
    release: Arc<Notify>,
}

#[async_trait]
impl BookingStore for GatedStore {
    async fn insert(&self, record: BookingRecord) -> Result<InsertAck> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(InsertAck::accepted(record))
    }

    async fn all(&self) -> Result<Vec<BookingRecord>> {
        Ok(Vec::new())
    }
}

/// A store that rejects every record with a message.
struct RejectingStore;

#[async_trait]
impl BookingStore for RejectingStore {
    async fn insert(&self, _record: BookingRecord) -> Result<InsertAck> {
        Ok(InsertAck::rejected("Server rejected the booking"))
    }

    async fn all(&self) -> Result<Vec<BookingRecord>> {
        Ok(Vec::new())
    }
}

/// A store whose call itself fails, as a hung-up network connection would.
struct ErroringStore;

#[async_trait]
impl BookingStore for ErroringStore {
    async fn insert(&self, _record: BookingRecord) -> Result<InsertAck> {
        Err(BookingError::StoreError("connection reset".to_string()))
    }

    async fn all(&self) -> Result<Vec<BookingRecord>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_single_in_flight_submission() {
    let store = GatedStore::default();
    let engine = Arc::new(SettlementEngine::new(Box::new(store.clone())));

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.settle(cash_request("user-1")).await }
    });

    // Wait until the first attempt is inside the store call.
    while store.calls.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
    }

    // A double-tap while submitting is a no-op.
    let second = engine.settle(cash_request("user-1")).await;
    assert!(matches!(second, SettlementOutcome::AlreadyInFlight));

    store.release.notify_one();
    let first = first.await.unwrap();
    assert!(matches!(first, SettlementOutcome::Succeeded { .. }));

    // Exactly one call reached the persistence boundary.
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_engine_reenters_idle_after_submission() {
    let store = GatedStore::default();
    let engine = Arc::new(SettlementEngine::new(Box::new(store.clone())));

    store.release.notify_one();
    let first = engine.settle(cash_request("user-1")).await;
    assert!(matches!(first, SettlementOutcome::Succeeded { .. }));

    store.release.notify_one();
    let second = engine.settle(cash_request("user-2")).await;
    assert!(matches!(second, SettlementOutcome::Succeeded { .. }));
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rejected_booking_surfaces_store_message() {
    let engine = SettlementEngine::new(Box::new(RejectingStore));
    let outcome = engine.settle(cash_request("user-1")).await;

    let SettlementOutcome::Failed { reason, message } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(reason, FailureReason::Persistence);
    assert_eq!(message, "Server rejected the booking");
}

#[tokio::test]
async fn test_store_error_normalized_to_persistence_failure() {
    let engine = SettlementEngine::new(Box::new(ErroringStore));
    let outcome = engine.settle(cash_request("user-1")).await;

    let SettlementOutcome::Failed { reason, message } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(reason, FailureReason::Persistence);
    assert!(message.contains("connection reset"));
}

#[tokio::test]
async fn test_checklist_summary_rides_along_with_booking() {
    let store = moveday::infrastructure::in_memory::InMemoryBookingStore::new();
    let engine = SettlementEngine::new(Box::new(store));

    let mut items = vec![
        ChecklistItem::new(1, "Pack kitchen", Priority::High).unwrap(),
        ChecklistItem::new(2, "Label boxes", Priority::Low).unwrap(),
    ];
    items[0].toggle();

    let mut request = cash_request("user-1");
    request.checklist = Some(summarize(&items));

    let outcome = engine.settle(request).await;
    let SettlementOutcome::Succeeded { record } = outcome else {
        panic!("expected success");
    };
    let summary = record.checklist.expect("summary should be persisted");
    assert_eq!(summary.completion_ratio, 0.5);
    assert_eq!(summary.items.len(), 2);
}

#[tokio::test]
async fn test_validation_failure_lists_every_violation() {
    let engine = SettlementEngine::new(Box::new(RejectingStore));

    let mut request = cash_request("user-1");
    request.method = PaymentMethod::Card;
    request.card = Some(CardDetails {
        number: "4111".to_string(),
        holder: "J".to_string(),
        expiry: "99".to_string(),
        cvv: "1".to_string(),
    });

    let outcome = engine.settle(request).await;
    let SettlementOutcome::Failed {
        reason: FailureReason::Validation(violations),
        message,
    } = outcome
    else {
        panic!("expected validation failure");
    };
    assert_eq!(violations.len(), 4);
    // All violations are reported at once, joined for display.
    assert_eq!(message.matches("; ").count(), 3);
}
