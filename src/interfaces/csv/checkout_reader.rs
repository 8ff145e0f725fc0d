use crate::application::settlement::{CheckoutRequest, PaymentMethod};
use crate::domain::card::{CardDetails, format_card_number, format_cvv, format_expiry};
use crate::domain::cost::{CostBreakdown, PricingConfig};
use crate::domain::trip::{Customer, TripContext, Vehicle};
use crate::error::{BookingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One checkout request as it appears in a replay CSV.
///
/// Everything except customer and method may be absent; the conversion to a
/// `CheckoutRequest` applies the same coercions the mobile client performs
/// before invoking the engine.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CheckoutRow {
    pub customer: String,
    pub name: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance_km: Option<Decimal>,
    pub duration: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub vehicle_id: Option<u32>,
    pub vehicle: Option<String>,
    pub rate: Option<Decimal>,
    pub method: PaymentMethod,
    pub card_number: Option<String>,
    pub card_holder: Option<String>,
    pub card_expiry: Option<String>,
    pub card_cvv: Option<String>,
}

impl CheckoutRow {
    /// Builds the engine request, quoting the cost along the way.
    ///
    /// Absent or negative rate and distance are coerced to zero here; the
    /// cost calculator itself only ever sees valid non-negative input. Card
    /// fields pass through the keystroke formatters exactly as they would in
    /// the client UI.
    pub fn into_request(self, pricing: &PricingConfig) -> CheckoutRequest {
        let rate = clamp_non_negative(self.rate);
        let distance_km = clamp_non_negative(self.distance_km);
        let cost = CostBreakdown::compute(rate, distance_km, pricing);

        let vehicle = self.vehicle.map(|name| Vehicle {
            id: self.vehicle_id.unwrap_or(0),
            name,
            rate,
        });

        let has_card_field = self.card_number.is_some()
            || self.card_holder.is_some()
            || self.card_expiry.is_some()
            || self.card_cvv.is_some();
        let card = has_card_field.then(|| CardDetails {
            number: format_card_number(self.card_number.as_deref().unwrap_or_default()),
            holder: self.card_holder.unwrap_or_default(),
            expiry: format_expiry(self.card_expiry.as_deref().unwrap_or_default()),
            cvv: format_cvv(self.card_cvv.as_deref().unwrap_or_default()),
        });

        CheckoutRequest {
            customer: Customer {
                id: self.customer,
                name: self.name.unwrap_or_default(),
            },
            trip: TripContext {
                origin: self.origin,
                destination: self.destination,
                distance_km: self.distance_km.map(|d| d.max(Decimal::ZERO)),
                duration: self.duration,
                date: self.date,
                time: self.time,
            },
            vehicle,
            cost,
            method: self.method,
            card,
            checklist: None,
        }
    }
}

fn clamp_non_negative(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}

/// Reads checkout requests from a CSV source.
///
/// Wraps `csv::Reader` and yields `Result<CheckoutRow>` lazily, so large
/// replay files stream without loading everything into memory. Whitespace is
/// trimmed and short records are tolerated.
pub struct CheckoutReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CheckoutReader<R> {
    /// Creates a new `CheckoutReader` from any `Read` source (e.g. File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes checkout rows.
    pub fn checkouts(self) -> impl Iterator<Item = Result<CheckoutRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BookingError::from))
    }
}
