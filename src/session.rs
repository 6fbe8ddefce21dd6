//! Planning sessions: one trip record plus its expense log.
//!
//! A session is a plain value. The planner service takes it by value and
//! hands back the updated session; `SessionStore` only keeps the latest copy
//! per id in memory.

use moka::future::Cache;
use moka::ops::compute::Op;
use rust_decimal::Decimal;
use serde::Serialize;
use std::future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Expense, ExpenseCategory, NewExpense, Trip};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No trip has been planned in this session yet")]
    NoTrip,

    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanningSession {
    pub id: Uuid,
    pub trip: Option<Trip>,
    pub expenses: Vec<Expense>,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            trip: None,
            expenses: Vec::new(),
        }
    }

    /// Replace the trip record. Any logged expenses belong to the old plan
    /// and are dropped.
    pub fn with_trip(self, trip: Trip) -> Self {
        Self {
            id: self.id,
            trip: Some(trip),
            expenses: Vec::new(),
        }
    }

    pub fn add_expense(&mut self, expense: NewExpense) -> Result<&Expense, SessionError> {
        if self.trip.is_none() {
            return Err(SessionError::NoTrip);
        }
        if expense.amount <= Decimal::ZERO {
            return Err(SessionError::NonPositiveAmount(expense.amount));
        }

        self.expenses.push(Expense::record(expense));
        let last = self.expenses.len() - 1;
        Ok(&self.expenses[last])
    }

    /// Actual spending against the plan. `None` until a trip exists.
    pub fn expense_summary(&self) -> Option<ExpenseSummary> {
        let trip = self.trip.as_ref()?;

        let categories: Vec<CategorySpend> = ExpenseCategory::ALL
            .iter()
            .map(|&category| CategorySpend {
                category,
                spent: self
                    .expenses
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.amount)
                    .sum(),
                estimated: estimated_for(trip, category),
            })
            .collect();

        let total_spent: Decimal = self.expenses.iter().map(|e| e.amount).sum();

        Some(ExpenseSummary {
            total_spent,
            estimate: trip.estimate,
            budget: trip.budget,
            remaining_budget: trip.budget - total_spent,
            variance_vs_estimate: total_spent - trip.estimate,
            expense_count: self.expenses.len(),
            categories,
        })
    }
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self::new()
    }
}

fn estimated_for(trip: &Trip, category: ExpenseCategory) -> Option<Decimal> {
    let breakdown = &trip.breakdown;
    match category {
        ExpenseCategory::Hotel => Some(breakdown.hotel_cost),
        ExpenseCategory::Food => Some(breakdown.food_cost),
        ExpenseCategory::Activities => Some(breakdown.activity_cost),
        ExpenseCategory::Transport => Some(breakdown.transport_cost),
        ExpenseCategory::Other => None,
    }
}

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: ExpenseCategory,
    #[serde(with = "rust_decimal::serde::str")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub estimated: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseSummary {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub estimate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub budget: Decimal,
    /// Negative once spending passes the budget
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_budget: Decimal,
    /// Positive when spending exceeds the estimate
    #[serde(with = "rust_decimal::serde::str")]
    pub variance_vs_estimate: Decimal,
    pub expense_count: usize,
    pub categories: Vec<CategorySpend>,
}

/// In-memory session store keyed by session id
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<PlanningSession>>,
}

impl SessionStore {
    /// Sessions expire after `idle` without access
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(10_000)
                .time_to_idle(idle)
                .build(),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<PlanningSession>> {
        self.sessions.get(&id).await
    }

    /// Store the session, replacing any previous copy with the same id
    pub async fn put(&self, session: PlanningSession) -> Arc<PlanningSession> {
        let session = Arc::new(session);
        self.sessions.insert(session.id, session.clone()).await;
        session
    }

    /// Replace the stored session with `f` applied to a copy of it.
    ///
    /// Updates to one id run one at a time, so concurrent callers never
    /// overwrite each other. `None` when no session has that id; when `f`
    /// fails the stored session is left as it was.
    pub async fn update<F, E>(&self, id: Uuid, f: F) -> Option<Result<Arc<PlanningSession>, E>>
    where
        F: FnOnce(PlanningSession) -> Result<PlanningSession, E>,
    {
        let mut outcome = None;
        self.sessions
            .entry(id)
            .and_compute_with(|entry| {
                let op = match entry {
                    Some(entry) => match f(PlanningSession::clone(entry.value())) {
                        Ok(session) => {
                            let session = Arc::new(session);
                            outcome = Some(Ok(session.clone()));
                            Op::Put(session)
                        }
                        Err(e) => {
                            outcome = Some(Err(e));
                            Op::Nop
                        }
                    },
                    None => Op::Nop,
                };
                future::ready(op)
            })
            .await;
        outcome
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).await.is_some()
    }

    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
