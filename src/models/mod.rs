//! Domain models

pub mod destination;
pub mod expense;
pub mod trip;

pub use destination::DestinationRates;
pub use expense::{Expense, ExpenseCategory, NewExpense};
pub use trip::{TravelStyle, Trip, TripParameters};
