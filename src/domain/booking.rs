use crate::domain::checklist::ChecklistSummary;
use crate::domain::cost::CostBreakdown;
use crate::domain::trip::{Customer, TripContext, Vehicle};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel substituted for missing upstream text fields.
pub const SENTINEL: &str = "N/A";

/// The persisted outcome of a completed checkout.
///
/// Structurally complete by construction: every field carries a sentinel
/// ("N/A" or zero) instead of being absent, even when the upstream trip
/// context is missing. Field names are the stable persistence contract.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BookingRecord {
    pub customer_id: String,
    pub customer_name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: Decimal,
    pub distance_price: Decimal,
    pub duration: String,
    pub vehicle_name: String,
    pub scheduled_at: String,
    pub total_price: Decimal,
    pub checklist: Option<ChecklistSummary>,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    /// Assembles the full record before any persistence call is made.
    ///
    /// Missing text fields become "N/A", missing numbers become zero, and
    /// date + time collapse into a single scheduled-at string.
    pub fn assemble(
        customer: &Customer,
        trip: &TripContext,
        vehicle: Option<&Vehicle>,
        cost: &CostBreakdown,
        checklist: Option<ChecklistSummary>,
    ) -> Self {
        let scheduled_at = match (trip.date.as_deref(), trip.time.as_deref()) {
            (Some(date), Some(time)) => format!("{date} {time}"),
            (Some(date), None) => date.to_string(),
            (None, Some(time)) => time.to_string(),
            (None, None) => SENTINEL.to_string(),
        };

        Self {
            customer_id: text_or_sentinel(Some(&customer.id)),
            customer_name: text_or_sentinel(Some(&customer.name)),
            origin: text_or_sentinel(trip.origin.as_deref()),
            destination: text_or_sentinel(trip.destination.as_deref()),
            distance_km: trip.distance_km.unwrap_or(Decimal::ZERO),
            distance_price: cost.distance_price,
            duration: text_or_sentinel(trip.duration.as_deref()),
            vehicle_name: text_or_sentinel(vehicle.map(|v| v.name.as_str())),
            scheduled_at,
            total_price: cost.total_cost,
            checklist,
            created_at: Utc::now(),
        }
    }
}

fn text_or_sentinel(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => SENTINEL.to_string(),
    }
}

/// Result of the external insert call: either the store accepted the record
/// (optionally echoing it back) or it reports a human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertAck {
    pub success: bool,
    pub record: Option<BookingRecord>,
    pub message: Option<String>,
}

impl InsertAck {
    pub fn accepted(record: BookingRecord) -> Self {
        Self {
            success: true,
            record: Some(record),
            message: None,
        }
    }

    pub fn rejected(message: &str) -> Self {
        Self {
            success: false,
            record: None,
            message: Some(message.to_string()),
        }
    }
}
