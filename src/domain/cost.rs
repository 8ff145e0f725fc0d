use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Pricing constants applied to every quote.
///
/// These are configuration, not business rules: deployments tune the per-km
/// rate and tax independently of the calculator itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Charge per kilometer of the trip.
    pub per_km_rate: Decimal,
    /// Flat shipping/handling cost added to every booking.
    pub shipping_flat: Decimal,
    /// Tax rate applied to base + distance price.
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            per_km_rate: dec!(100),
            shipping_flat: dec!(5000),
            tax_rate: dec!(0.16),
        }
    }
}

/// The quoted cost of a move, broken down by component.
///
/// Values are exact decimals; rounding to two fraction digits happens only at
/// presentation time. `total_cost` is always the sum of the other four fields
/// because it is computed from them in `compute` and nowhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub base_price: Decimal,
    pub distance_price: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total_cost: Decimal,
}

impl CostBreakdown {
    /// Computes the full breakdown for a vehicle rate and trip distance.
    ///
    /// Pure function. Inputs are assumed non-negative; callers coerce absent
    /// or malformed values to zero before calling (see `CheckoutRow`).
    pub fn compute(vehicle_rate: Decimal, distance_km: Decimal, pricing: &PricingConfig) -> Self {
        let base_price = vehicle_rate;
        let distance_price = distance_km * pricing.per_km_rate;
        let shipping_cost = pricing.shipping_flat;
        let tax = (base_price + distance_price) * pricing.tax_rate;
        let total_cost = base_price + distance_price + shipping_cost + tax;
        Self {
            base_price,
            distance_price,
            shipping_cost,
            tax,
            total_cost,
        }
    }

    /// A breakdown for a booking with no priced vehicle or distance.
    pub fn zero(pricing: &PricingConfig) -> Self {
        Self::compute(Decimal::ZERO, Decimal::ZERO, pricing)
    }
}
