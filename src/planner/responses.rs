//! Response DTOs for planner API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Currency;
use crate::models::{DestinationRates, Expense, TravelStyle, Trip};
use crate::session::{ExpenseSummary, PlanningSession};
use crate::weather::WeatherLookup;

use super::advisories::Advisory;
use super::calculators::BudgetVerdict;
use super::itinerary::ItineraryDay;
use super::services::TripEstimate;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
    /// Human readable, e.g. "₹18,000"
    pub display: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &Currency) -> Self {
        Self {
            amount,
            currency: currency.code.clone(),
            display: currency.format(amount),
        }
    }
}

/// Cost breakdown with currency attached
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub rooms: u32,
    pub hotel: MoneyResponse,
    pub food: MoneyResponse,
    pub activities: MoneyResponse,
    pub transport: MoneyResponse,
    pub total: MoneyResponse,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerdictResponse {
    OverBudget { amount: MoneyResponse },
    WithinBudget { savings: MoneyResponse },
}

impl VerdictResponse {
    fn new(verdict: BudgetVerdict, currency: &Currency) -> Self {
        match verdict {
            BudgetVerdict::OverBudget { amount } => VerdictResponse::OverBudget {
                amount: MoneyResponse::new(amount, currency),
            },
            BudgetVerdict::WithinBudget { savings } => VerdictResponse::WithinBudget {
                savings: MoneyResponse::new(savings, currency),
            },
        }
    }
}

/// Response for a trip estimate
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    pub travelers: u32,
    pub style: TravelStyle,
    pub pace: u8,
    pub breakdown: BreakdownResponse,
    pub budget: MoneyResponse,
    pub verdict: VerdictResponse,
    pub advisories: Vec<Advisory>,
    pub weather: WeatherLookup,
    pub itinerary: Vec<ItineraryDay>,
}

impl EstimateResponse {
    pub fn new(estimate: &TripEstimate, currency: &Currency) -> Self {
        let b = &estimate.breakdown;
        Self {
            destination: estimate.params.destination.clone(),
            start_date: estimate.params.start_date,
            end_date: estimate.params.end_date,
            days: estimate.days,
            travelers: estimate.params.travelers,
            style: estimate.params.style,
            pace: estimate.params.pace,
            breakdown: BreakdownResponse {
                rooms: b.rooms,
                hotel: MoneyResponse::new(b.hotel_cost, currency),
                food: MoneyResponse::new(b.food_cost, currency),
                activities: MoneyResponse::new(b.activity_cost, currency),
                transport: MoneyResponse::new(b.transport_cost, currency),
                total: MoneyResponse::new(b.total, currency),
            },
            budget: MoneyResponse::new(estimate.params.budget, currency),
            verdict: VerdictResponse::new(estimate.verdict, currency),
            advisories: estimate.advisories.clone(),
            weather: estimate.weather.clone(),
            itinerary: estimate.itinerary.clone(),
        }
    }
}

/// Response for a planning session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub currency: String,
    pub trip: Option<Trip>,
    pub expenses: Vec<Expense>,
    pub summary: Option<ExpenseSummary>,
}

impl SessionResponse {
    pub fn new(session: &PlanningSession, currency: &Currency) -> Self {
        Self {
            session_id: session.id,
            currency: currency.code.clone(),
            trip: session.trip.clone(),
            expenses: session.expenses.clone(),
            summary: session.expense_summary(),
        }
    }
}

/// Response for a plan generated into a session
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub session_id: Uuid,
    pub estimate: EstimateResponse,
}

/// One selectable destination
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    pub name: String,
    pub hotel_per_room_per_night: MoneyResponse,
    pub food_per_person_per_day: MoneyResponse,
    pub activities_per_person_per_day: MoneyResponse,
    pub transport_fixed: MoneyResponse,
}

impl DestinationResponse {
    pub fn new(rates: &DestinationRates, currency: &Currency) -> Self {
        Self {
            name: rates.destination.clone(),
            hotel_per_room_per_night: MoneyResponse::new(
                rates.hotel_cost_per_room_per_night,
                currency,
            ),
            food_per_person_per_day: MoneyResponse::new(
                rates.food_cost_per_person_per_day,
                currency,
            ),
            activities_per_person_per_day: MoneyResponse::new(
                rates.activity_cost_per_person_per_day,
                currency,
            ),
            transport_fixed: MoneyResponse::new(rates.transport_cost_fixed, currency),
        }
    }
}

/// Generic planner error response
#[derive(Debug, Serialize)]
pub struct PlannerErrorResponse {
    pub error_type: String,
    pub message: String,
}
