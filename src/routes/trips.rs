//! Expense tracking pages for a generated trip

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::Currency;
use crate::error::Result;
use crate::models::ExpenseCategory;
use crate::planner::requests::AddExpenseRequest;
use crate::planner::services::{self, PlannerError};
use crate::session::{ExpenseSummary, SessionError};
use crate::AppState;

pub struct ExpenseView {
    pub category: &'static str,
    pub amount: String,
    pub note: String,
    pub spent_on: String,
}

pub struct CategoryView {
    pub label: &'static str,
    pub spent: String,
    pub estimated: String,
}

/// Expense tracking template
#[derive(Template)]
#[template(path = "trips/expenses.html")]
struct TripExpensesTemplate {
    session_id: String,
    destination: String,
    start_date: String,
    end_date: String,
    days: u32,
    travelers: u32,
    rooms: u32,
    style: &'static str,
    pace: u8,
    estimate: String,
    budget: String,
    expenses: Vec<ExpenseView>,
    has_expenses: bool,
    categories: Vec<CategoryView>,
    total_spent: String,
    remaining: String,
    over_budget: bool,
    category_options: Vec<&'static str>,
}

/// Trip summary and logged expenses
pub async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Html<String>> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or(PlannerError::SessionNotFound(id))?;
    let trip = session
        .trip
        .as_ref()
        .ok_or(PlannerError::Session(SessionError::NoTrip))?;
    let summary = session
        .expense_summary()
        .ok_or(PlannerError::Session(SessionError::NoTrip))?;

    let currency = &state.currency;
    let template = TripExpensesTemplate {
        session_id: session.id.to_string(),
        destination: trip.destination.clone(),
        start_date: trip.start_date.to_string(),
        end_date: trip.end_date.to_string(),
        days: trip.days,
        travelers: trip.travelers,
        rooms: trip.rooms,
        style: trip.style.label(),
        pace: trip.pace,
        estimate: currency.format(trip.estimate),
        budget: currency.format(trip.budget),
        expenses: session
            .expenses
            .iter()
            .map(|e| ExpenseView {
                category: e.category.label(),
                amount: currency.format(e.amount),
                note: e.note.clone(),
                spent_on: e.spent_on.map(|d| d.to_string()).unwrap_or_default(),
            })
            .collect(),
        has_expenses: !session.expenses.is_empty(),
        categories: category_views(&summary, currency),
        total_spent: currency.format(summary.total_spent),
        remaining: currency.format(summary.remaining_budget),
        over_budget: summary.remaining_budget < Decimal::ZERO,
        category_options: ExpenseCategory::ALL.iter().map(|c| c.label()).collect(),
    };

    Ok(Html(template.render()?))
}

fn category_views(summary: &ExpenseSummary, currency: &Currency) -> Vec<CategoryView> {
    summary
        .categories
        .iter()
        .map(|c| CategoryView {
            label: c.category.label(),
            spent: currency.format(c.spent),
            estimated: c
                .estimated
                .map(|amount| currency.format(amount))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// Log an expense from the form and return to the trip page
pub async fn add_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(req): Form<AddExpenseRequest>,
) -> Result<Redirect> {
    services::record_expense(&state.sessions, id, req.into()).await?;
    Ok(Redirect::to(&format!("/trips/{}", id)))
}
