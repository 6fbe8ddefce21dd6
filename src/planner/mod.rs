//! Trip planner module.
//!
//! Cost estimation, advisories and itinerary building, plus the JSON API
//! that exposes them.

pub mod advisories;
pub mod calculators;
pub mod itinerary;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use advisories::{pace_advisory, weather_advisory, Advisory, AdvisoryKind};
pub use calculators::{
    budget_verdict, compute_breakdown, compute_rooms, format_money, round_money, BudgetVerdict,
    CostBreakdown, EstimateError,
};
pub use itinerary::{build_itinerary, Itinerary, ItineraryDay};
pub use routes::router;
pub use services::{PlannerError, TripEstimate};
