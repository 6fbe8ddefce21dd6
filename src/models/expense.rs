//! Logged expenses

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Expense category. The first four line up with the cost breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Hotel,
    Food,
    Activities,
    Transport,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Hotel,
        ExpenseCategory::Food,
        ExpenseCategory::Activities,
        ExpenseCategory::Transport,
        ExpenseCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Hotel => "Hotel",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Activities => "Activities",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Expense as submitted, before it is recorded
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub note: String,
    pub spent_on: Option<NaiveDate>,
}

/// A recorded expense
#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: Uuid,
    pub category: ExpenseCategory,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub note: String,
    pub spent_on: Option<NaiveDate>,
    pub recorded_at: DateTime<Utc>,
}

impl Expense {
    pub fn record(new: NewExpense) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: new.category,
            amount: new.amount,
            note: new.note,
            spent_on: new.spent_on,
            recorded_at: Utc::now(),
        }
    }
}
