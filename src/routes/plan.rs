//! Planner form and generated plan pages

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};
use chrono::{Days, Local};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::TravelStyle;
use crate::planner::advisories::Advisory;
use crate::planner::calculators::BudgetVerdict;
use crate::planner::requests::{
    empty_as_none, PlanTripRequest, BUDGET_MAX, BUDGET_MIN, MAX_TRIP_DAYS, OCCUPANCY_RANGE,
    PACE_RANGE, TRAVELERS_RANGE,
};
use crate::planner::services::{self, TripEstimate};
use crate::weather::WeatherObservation;
use crate::AppState;

/// Query parameters for the planner form
#[derive(Debug, Deserialize)]
pub struct PlanFormQuery {
    /// Present when re-planning from an existing trip page
    #[serde(default, deserialize_with = "empty_as_none")]
    pub session_id: Option<Uuid>,
}

pub struct StyleOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Planner form template
#[derive(Template)]
#[template(path = "plan/form.html")]
pub struct PlanFormTemplate {
    destinations: Vec<String>,
    styles: Vec<StyleOption>,
    start_date: String,
    end_date: String,
    max_trip_days: u32,
    travelers: u32,
    travelers_max: u32,
    occupancy: u32,
    occupancy_max: u32,
    budget: String,
    budget_min: String,
    budget_max: String,
    pace: u8,
    pace_max: u8,
    session_id: String,
    has_session: bool,
    currency_symbol: String,
}

pub struct AdvisoryView {
    pub css_class: &'static str,
    pub message: &'static str,
}

impl From<&Advisory> for AdvisoryView {
    fn from(advisory: &Advisory) -> Self {
        Self {
            css_class: advisory.severity.as_str(),
            message: advisory.message,
        }
    }
}

pub struct ItineraryDayView {
    pub day: u32,
    pub date: String,
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub evening: &'static str,
}

pub struct CostLineView {
    pub label: &'static str,
    pub amount: String,
}

/// Generated plan template
#[derive(Template)]
#[template(path = "plan/result.html")]
struct PlanResultTemplate {
    session_id: String,
    destination: String,
    start_date: String,
    end_date: String,
    days: u32,
    travelers: u32,
    style: &'static str,
    pace: u8,
    rooms: u32,
    has_weather: bool,
    weather_line: String,
    advisories: Vec<AdvisoryView>,
    itinerary: Vec<ItineraryDayView>,
    cost_lines: Vec<CostLineView>,
    total: String,
    over_budget: bool,
    verdict_amount: String,
}

/// Planner form with default dates of today and two days out
pub async fn form(
    State(state): State<AppState>,
    Query(query): Query<PlanFormQuery>,
) -> PlanFormTemplate {
    let today = Local::now().date_naive();
    let end = today.checked_add_days(Days::new(2)).unwrap_or(today);

    PlanFormTemplate {
        destinations: state.rates.destinations().map(str::to_string).collect(),
        styles: TravelStyle::ALL
            .iter()
            .map(|&style| StyleOption {
                label: style.label(),
                selected: style == TravelStyle::default(),
            })
            .collect(),
        start_date: today.to_string(),
        end_date: end.to_string(),
        max_trip_days: MAX_TRIP_DAYS,
        travelers: 2,
        travelers_max: *TRAVELERS_RANGE.end(),
        occupancy: 2,
        occupancy_max: *OCCUPANCY_RANGE.end(),
        budget: "20000".to_string(),
        budget_min: BUDGET_MIN.to_string(),
        budget_max: BUDGET_MAX.to_string(),
        pace: 3,
        pace_max: *PACE_RANGE.end(),
        has_session: query.session_id.is_some(),
        session_id: query.session_id.map(|id| id.to_string()).unwrap_or_default(),
        currency_symbol: state.currency.symbol.clone(),
    }
}

/// Generate a plan from the submitted form and show it
pub async fn submit(
    State(state): State<AppState>,
    Form(req): Form<PlanTripRequest>,
) -> Result<Html<String>> {
    req.validate().map_err(AppError::Validation)?;

    let session_id = req.session_id;
    let estimate =
        services::plan_trip(&state.rates, state.weather.as_ref(), req.into_params()).await?;
    let session = services::commit_plan(&state.sessions, session_id, &estimate).await;

    let template = result_template(&estimate, session.id, &state);
    Ok(Html(template.render()?))
}

fn result_template(estimate: &TripEstimate, session_id: Uuid, state: &AppState) -> PlanResultTemplate {
    let currency = &state.currency;
    let params = &estimate.params;
    let observation = estimate.weather.observation();

    let (over_budget, verdict_amount) = match estimate.verdict {
        BudgetVerdict::OverBudget { amount } => (true, currency.format(amount)),
        BudgetVerdict::WithinBudget { savings } => (false, currency.format(savings)),
    };

    PlanResultTemplate {
        session_id: session_id.to_string(),
        destination: params.destination.clone(),
        start_date: params.start_date.to_string(),
        end_date: params.end_date.to_string(),
        days: estimate.days,
        travelers: params.travelers,
        style: params.style.label(),
        pace: params.pace,
        rooms: estimate.breakdown.rooms,
        has_weather: observation.is_some(),
        weather_line: observation.map(weather_line).unwrap_or_default(),
        advisories: estimate.advisories.iter().map(AdvisoryView::from).collect(),
        itinerary: estimate
            .itinerary
            .iter()
            .map(|day| ItineraryDayView {
                day: day.day,
                date: day.date.map(|d| d.to_string()).unwrap_or_default(),
                morning: day.morning,
                afternoon: day.afternoon,
                evening: day.evening,
            })
            .collect(),
        cost_lines: estimate
            .breakdown
            .lines()
            .iter()
            .map(|&(label, amount)| CostLineView {
                label,
                amount: currency.format(amount),
            })
            .collect(),
        total: currency.format(estimate.breakdown.total),
        over_budget,
        verdict_amount,
    }
}

fn weather_line(observation: &WeatherObservation) -> String {
    format!(
        "{}°C, {}",
        observation.temperature_celsius,
        capitalize(&observation.description)
    )
}

/// First letter upper case, the rest lower case
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
