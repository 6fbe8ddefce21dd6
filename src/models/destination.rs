//! Destination rate rows

use rust_decimal::Decimal;
use serde::Serialize;

/// Per-destination unit costs, one row of the rate dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationRates {
    pub destination: String,
    /// Per room, per night
    #[serde(with = "rust_decimal::serde::str")]
    pub hotel_cost_per_room_per_night: Decimal,
    /// Per person, per day
    #[serde(with = "rust_decimal::serde::str")]
    pub food_cost_per_person_per_day: Decimal,
    /// Per person, per day
    #[serde(with = "rust_decimal::serde::str")]
    pub activity_cost_per_person_per_day: Decimal,
    /// Flat fee for the whole trip
    #[serde(with = "rust_decimal::serde::str")]
    pub transport_cost_fixed: Decimal,
}
