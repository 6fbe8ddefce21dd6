//! Request DTOs for planner endpoints and forms.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{ExpenseCategory, NewExpense, TravelStyle, TripParameters};

pub const TRAVELERS_RANGE: RangeInclusive<u32> = 1..=20;
pub const OCCUPANCY_RANGE: RangeInclusive<u32> = 1..=4;
pub const PACE_RANGE: RangeInclusive<u8> = 1..=5;
pub const BUDGET_MIN: Decimal = dec!(1000);
pub const BUDGET_MAX: Decimal = dec!(500000);
/// Longest trip the planner will lay out day by day
pub const MAX_TRIP_DAYS: u32 = 60;

/// Form fields arrive as strings, so a blank field means "not given".
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

fn default_pace() -> u8 {
    3
}

/// Request to estimate or plan a trip
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub occupancy: u32,
    pub budget: Decimal,
    #[serde(default)]
    pub style: TravelStyle,
    #[serde(default = "default_pace")]
    pub pace: u8,
    /// Regenerate into this session instead of starting a new one
    #[serde(default, deserialize_with = "empty_as_none")]
    pub session_id: Option<Uuid>,
}

impl PlanTripRequest {
    /// Check the input bounds the planner form enforces.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.destination.trim().is_empty() {
            errors.push("destination is required".to_string());
        }
        let span = self.end_date.signed_duration_since(self.start_date).num_days();
        if span < 0 {
            errors.push("end_date must not be before start_date".to_string());
        } else if span > i64::from(MAX_TRIP_DAYS) {
            errors.push(format!("trips can be at most {} days", MAX_TRIP_DAYS));
        }
        if !TRAVELERS_RANGE.contains(&self.travelers) {
            errors.push(format!(
                "travelers must be between {} and {}",
                TRAVELERS_RANGE.start(),
                TRAVELERS_RANGE.end()
            ));
        }
        if !OCCUPANCY_RANGE.contains(&self.occupancy) {
            errors.push(format!(
                "occupancy must be between {} and {}",
                OCCUPANCY_RANGE.start(),
                OCCUPANCY_RANGE.end()
            ));
        }
        if self.budget < BUDGET_MIN || self.budget > BUDGET_MAX {
            errors.push(format!(
                "budget must be between {} and {}",
                BUDGET_MIN, BUDGET_MAX
            ));
        }
        if !PACE_RANGE.contains(&self.pace) {
            errors.push(format!(
                "pace must be between {} and {}",
                PACE_RANGE.start(),
                PACE_RANGE.end()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }

    pub fn into_params(self) -> TripParameters {
        TripParameters {
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            travelers: self.travelers,
            occupancy: self.occupancy,
            budget: self.budget,
            style: self.style,
            pace: self.pace,
        }
    }
}

/// Request to log an expense
#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    pub category: ExpenseCategory,
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub spent_on: Option<NaiveDate>,
}

impl From<AddExpenseRequest> for NewExpense {
    fn from(req: AddExpenseRequest) -> Self {
        NewExpense {
            category: req.category,
            amount: req.amount,
            note: req.note.trim().to_string(),
            spent_on: req.spent_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> PlanTripRequest {
        serde_json::from_value(json!({
            "destination": "Goa",
            "start_date": "2026-11-01",
            "end_date": "2026-11-04",
            "travelers": 5,
            "occupancy": 2,
            "budget": 20000
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = request();
        assert_eq!(req.style, TravelStyle::Relaxed);
        assert_eq!(req.pace, 3);
        assert_eq!(req.session_id, None);
        assert_eq!(req.budget, dec!(20000));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_budget_as_string() {
        let req: PlanTripRequest = serde_json::from_value(json!({
            "destination": "Goa",
            "start_date": "2026-11-01",
            "end_date": "2026-11-04",
            "travelers": 5,
            "occupancy": 2,
            "budget": "15000.50",
            "style": "Luxury",
            "pace": 5
        }))
        .unwrap();
        assert_eq!(req.budget, dec!(15000.50));
        assert_eq!(req.style, TravelStyle::Luxury);
    }

    #[test]
    fn test_blank_session_id_is_none() {
        let req: PlanTripRequest = serde_json::from_value(json!({
            "destination": "Goa",
            "start_date": "2026-11-01",
            "end_date": "2026-11-04",
            "travelers": 5,
            "occupancy": 2,
            "budget": 20000,
            "session_id": ""
        }))
        .unwrap();
        assert_eq!(req.session_id, None);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut req = request();
        req.travelers = 0;
        req.occupancy = 5;
        req.pace = 6;
        req.budget = dec!(500);
        req.end_date = NaiveDate::from_ymd_opt(2026, 10, 30).unwrap();

        let message = req.validate().unwrap_err();
        assert!(message.contains("travelers"));
        assert!(message.contains("occupancy"));
        assert!(message.contains("pace"));
        assert!(message.contains("budget"));
        assert!(message.contains("end_date"));
    }

    #[test]
    fn test_validate_boundaries_inclusive() {
        let mut req = request();
        req.travelers = 20;
        req.occupancy = 4;
        req.pace = 1;
        req.budget = dec!(1000);
        req.end_date = req.start_date;
        assert!(req.validate().is_ok());

        req.budget = dec!(500000);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_trip_length_bound() {
        let mut req = request();
        req.end_date = req.start_date + chrono::Days::new(u64::from(MAX_TRIP_DAYS));
        assert!(req.validate().is_ok());
        assert_eq!(req.into_params().days(), MAX_TRIP_DAYS);

        let mut req = request();
        req.end_date = req.start_date + chrono::Days::new(u64::from(MAX_TRIP_DAYS) + 1);
        assert!(req.validate().unwrap_err().contains("at most 60 days"));

        let mut req = request();
        req.start_date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        req.end_date = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_expense_request_blank_date() {
        let req: AddExpenseRequest = serde_json::from_value(json!({
            "category": "Food",
            "amount": "450.75",
            "note": "  Dinner  ",
            "spent_on": ""
        }))
        .unwrap();
        let expense = NewExpense::from(req);
        assert_eq!(expense.category, ExpenseCategory::Food);
        assert_eq!(expense.amount, dec!(450.75));
        assert_eq!(expense.note, "Dinner");
        assert_eq!(expense.spent_on, None);
    }
}
