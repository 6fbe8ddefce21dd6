//! Core trip cost calculation functions.
//!
//! Pure functions for cost math - no dataset or network access.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::trip::TripSize;
use crate::models::DestinationRates;

/// Precondition violations the estimator refuses to compute through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("{field} must be at least 1, got {value}")]
    BelowMinimum { field: &'static str, value: u32 },
}

fn require_positive(field: &'static str, value: u32) -> Result<u32, EstimateError> {
    if value == 0 {
        return Err(EstimateError::BelowMinimum { field, value });
    }
    Ok(value)
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Only used for display; computed costs are kept exact.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use trip_planner::planner::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Format an amount with a currency symbol and thousands separators.
///
/// Whole amounts print without decimals (`₹18,000`), fractional ones with
/// two places (`₹1,234.50`). Negative amounts lead with the sign.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = round_money(amount, 2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let abs = rounded.abs();
    let whole = abs.trunc().normalize();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);

    let grouped = group_thousands(&whole.to_string());
    if cents == 0 {
        format!("{}{}{}", sign, symbol, grouped)
    } else {
        format!("{}{}{}.{:02}", sign, symbol, grouped, cents)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rooms needed when `occupancy` people share each room.
///
/// Integer ceiling division: a partly filled room still has to be booked.
pub fn compute_rooms(travelers: u32, occupancy: u32) -> Result<u32, EstimateError> {
    let travelers = require_positive("travelers", travelers)?;
    let occupancy = require_positive("occupancy", occupancy)?;
    Ok(travelers.div_ceil(occupancy))
}

/// Four-way split of the estimated trip cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub rooms: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub hotel_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub food_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub activity_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub transport_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

impl CostBreakdown {
    /// Category label and amount, in display order.
    pub fn lines(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Hotel", self.hotel_cost),
            ("Food", self.food_cost),
            ("Activities", self.activity_cost),
            ("Transport", self.transport_cost),
        ]
    }
}

/// Calculate the cost breakdown for a trip.
///
/// Hotel scales by rooms and days, food and activities by travelers and
/// days, transport is a flat fee. `total` is the exact sum of the four.
pub fn compute_breakdown(
    rates: &DestinationRates,
    size: TripSize,
) -> Result<CostBreakdown, EstimateError> {
    let days = Decimal::from(require_positive("days", size.days)?);
    let rooms = compute_rooms(size.travelers, size.occupancy)?;
    let travelers = Decimal::from(size.travelers);

    let hotel_cost = rates.hotel_cost_per_room_per_night * days * Decimal::from(rooms);
    let food_cost = rates.food_cost_per_person_per_day * days * travelers;
    let activity_cost = rates.activity_cost_per_person_per_day * days * travelers;
    let transport_cost = rates.transport_cost_fixed;

    let total = hotel_cost + food_cost + activity_cost + transport_cost;

    Ok(CostBreakdown {
        rooms,
        hotel_cost,
        food_cost,
        activity_cost,
        transport_cost,
        total,
    })
}

/// Estimated total compared against the user's budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetVerdict {
    OverBudget {
        #[serde(with = "rust_decimal::serde::str")]
        amount: Decimal,
    },
    WithinBudget {
        #[serde(with = "rust_decimal::serde::str")]
        savings: Decimal,
    },
}

impl BudgetVerdict {
    pub fn is_over(&self) -> bool {
        matches!(self, BudgetVerdict::OverBudget { .. })
    }
}

/// Classify `total` against `budget`. An exact match is within budget.
pub fn budget_verdict(total: Decimal, budget: Decimal) -> BudgetVerdict {
    if total > budget {
        BudgetVerdict::OverBudget {
            amount: total - budget,
        }
    } else {
        BudgetVerdict::WithinBudget {
            savings: budget - total,
        }
    }
}
