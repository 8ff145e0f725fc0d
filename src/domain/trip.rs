use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The user requesting the move. Provided by the surrounding application;
/// the settlement core only reads it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Customer {
    pub id: String,
    pub name: String,
}

/// A vehicle the user can book, with its flat rate in the service currency.
///
/// The rate arrives already parsed to a number; currency-string handling is
/// the caller's job. Rate is never negative.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Vehicle {
    pub id: u32,
    pub name: String,
    pub rate: Decimal,
}

/// Read-only snapshot of the trip being booked.
///
/// Any field may be absent when upstream state is incomplete; sentinel
/// defaults are substituted at booking assembly, not here.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct TripContext {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance_km: Option<Decimal>,
    pub duration: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}
