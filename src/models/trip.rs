//! Trip parameters and the per-session trip record

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::planner::calculators::CostBreakdown;

/// Travel style chosen on the planner form. Display metadata only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelStyle {
    #[default]
    Relaxed,
    Adventure,
    Budget,
    Luxury,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 4] = [
        TravelStyle::Relaxed,
        TravelStyle::Adventure,
        TravelStyle::Budget,
        TravelStyle::Luxury,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TravelStyle::Relaxed => "Relaxed",
            TravelStyle::Adventure => "Adventure",
            TravelStyle::Budget => "Budget",
            TravelStyle::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Head count and duration, the only inputs the cost formulas scale by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripSize {
    pub days: u32,
    pub travelers: u32,
    /// People per room
    pub occupancy: u32,
}

/// Everything the user enters on the planner form.
///
/// The date range is the canonical duration; `days()` derives the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripParameters {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: u32,
    pub occupancy: u32,
    pub budget: Decimal,
    pub style: TravelStyle,
    pub pace: u8,
}

impl TripParameters {
    /// Whole days between start and end, never less than one.
    pub fn days(&self) -> u32 {
        let span = (self.end_date - self.start_date).num_days().max(1);
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    pub fn size(&self) -> TripSize {
        TripSize {
            days: self.days(),
            travelers: self.travelers,
            occupancy: self.occupancy,
        }
    }
}

/// Trip record handed to the expense tracker.
///
/// Created once per "generate plan" and replaced on regeneration.
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    pub travelers: u32,
    pub rooms: u32,
    pub breakdown: CostBreakdown,
    #[serde(with = "rust_decimal::serde::str")]
    pub estimate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub budget: Decimal,
    pub pace: u8,
    pub style: TravelStyle,
    pub created_at: DateTime<Utc>,
}
