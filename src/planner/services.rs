//! Planner service functions with dataset, weather and session access.
//!
//! These functions look up rates and weather, run the pure calculators, and
//! hand the resulting trip record to the planning session.

use chrono::Utc;
use std::convert::Infallible;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dataset::RateTable;
use crate::models::{DestinationRates, NewExpense, Trip, TripParameters};
use crate::session::{PlanningSession, SessionError, SessionStore};
use crate::weather::{WeatherLookup, WeatherProvider};

use super::advisories::{pace_advisory, weather_advisory, Advisory};
use super::calculators::{
    budget_verdict, compute_breakdown, BudgetVerdict, CostBreakdown, EstimateError,
};
use super::itinerary::{build_itinerary, ItineraryDay};

/// Planner error types
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Unknown destination: {0}")]
    UnknownDestination(String),

    #[error("Planning session not found: {0}")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Everything rendered for one "generate plan" action
#[derive(Debug, Clone)]
pub struct TripEstimate {
    pub params: TripParameters,
    pub days: u32,
    pub breakdown: CostBreakdown,
    pub verdict: BudgetVerdict,
    /// Pace advisory first, then weather
    pub advisories: Vec<Advisory>,
    pub weather: WeatherLookup,
    pub itinerary: Vec<ItineraryDay>,
}

impl TripEstimate {
    /// Session record for the expense tracker
    pub fn to_trip(&self) -> Trip {
        Trip {
            destination: self.params.destination.clone(),
            start_date: self.params.start_date,
            end_date: self.params.end_date,
            days: self.days,
            travelers: self.params.travelers,
            rooms: self.breakdown.rooms,
            breakdown: self.breakdown.clone(),
            estimate: self.breakdown.total,
            budget: self.params.budget,
            pace: self.params.pace,
            style: self.params.style,
            created_at: Utc::now(),
        }
    }
}

/// Estimate a trip from a known rate row and an already fetched weather
/// lookup. Pure: no I/O.
pub fn estimate_trip(
    rates: &DestinationRates,
    params: TripParameters,
    weather: WeatherLookup,
) -> Result<TripEstimate, EstimateError> {
    let size = params.size();
    let breakdown = compute_breakdown(rates, size)?;
    let verdict = budget_verdict(breakdown.total, params.budget);

    let advisories = pace_advisory(params.pace)
        .into_iter()
        .chain(weather_advisory(&weather))
        .collect();

    let itinerary = build_itinerary(size.days, Some(params.start_date)).collect();

    Ok(TripEstimate {
        days: size.days,
        breakdown,
        verdict,
        advisories,
        weather,
        itinerary,
        params,
    })
}

/// Look up rates and current weather for the destination, then estimate.
pub async fn plan_trip(
    table: &RateTable,
    weather: &dyn WeatherProvider,
    params: TripParameters,
) -> Result<TripEstimate, PlannerError> {
    let rates = table
        .get(&params.destination)
        .ok_or_else(|| PlannerError::UnknownDestination(params.destination.clone()))?;

    let lookup = weather.current(&params.destination).await;
    let estimate = estimate_trip(rates, params, lookup)?;

    debug!(
        "Estimated {} for {} ({} days, {} travelers)",
        estimate.breakdown.total,
        estimate.params.destination,
        estimate.days,
        estimate.params.travelers
    );
    Ok(estimate)
}

/// Install a freshly generated plan into the session, clearing its
/// expense log.
pub fn generate_plan(session: PlanningSession, estimate: &TripEstimate) -> PlanningSession {
    session.with_trip(estimate.to_trip())
}

/// Generate the plan into an existing session, or a new one when `session_id`
/// is absent or has expired, and store it.
pub async fn commit_plan(
    store: &SessionStore,
    session_id: Option<Uuid>,
    estimate: &TripEstimate,
) -> Arc<PlanningSession> {
    let regenerated = match session_id {
        Some(id) => store
            .update(id, |session| {
                Ok::<_, Infallible>(generate_plan(session, estimate))
            })
            .await
            .and_then(Result::ok),
        None => None,
    };

    let session = match regenerated {
        Some(session) => session,
        None => {
            if let Some(id) = session_id {
                debug!("Session {} not found, starting a new one", id);
            }
            store
                .put(generate_plan(PlanningSession::new(), estimate))
                .await
        }
    };

    info!(
        "Plan generated for {} in session {}",
        estimate.params.destination, session.id
    );
    session
}

/// Log an expense against the session's current trip.
pub async fn record_expense(
    store: &SessionStore,
    session_id: Uuid,
    expense: NewExpense,
) -> Result<Arc<PlanningSession>, PlannerError> {
    let session = store
        .update(session_id, |mut session| {
            session.add_expense(expense)?;
            Ok::<_, SessionError>(session)
        })
        .await
        .ok_or(PlannerError::SessionNotFound(session_id))??;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, TravelStyle};
    use crate::planner::advisories::AdvisoryKind;
    use crate::weather::{DisabledWeather, WeatherObservation};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    const DATASET: &str = "\
Destination,HotelCost,FoodCost,ActivitiesCost,TransportCost
Goa,1000,300,200,1500
";

    fn table() -> RateTable {
        RateTable::from_reader(DATASET.as_bytes()).unwrap()
    }

    fn params(budget: Decimal, pace: u8) -> TripParameters {
        TripParameters {
            destination: "Goa".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 11, 4).unwrap(),
            travelers: 5,
            occupancy: 2,
            budget,
            style: TravelStyle::Adventure,
            pace,
        }
    }

    struct Fixed(WeatherLookup);

    #[async_trait]
    impl WeatherProvider for Fixed {
        async fn current(&self, _city: &str) -> WeatherLookup {
            self.0.clone()
        }
    }

    fn observed(temperature_celsius: f64, description: &str) -> Fixed {
        Fixed(WeatherLookup::Observed(WeatherObservation {
            temperature_celsius,
            description: description.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_plan_within_budget() {
        let estimate = plan_trip(&table(), &DisabledWeather, params(dec!(20000), 3))
            .await
            .unwrap();

        assert_eq!(estimate.days, 3);
        assert_eq!(estimate.breakdown.rooms, 3);
        assert_eq!(estimate.breakdown.total, dec!(18000));
        assert_eq!(
            estimate.verdict,
            BudgetVerdict::WithinBudget {
                savings: dec!(2000)
            }
        );
        assert!(estimate.advisories.is_empty());
        assert_eq!(estimate.itinerary.len(), 3);
        assert_eq!(
            estimate.itinerary[2].date,
            NaiveDate::from_ymd_opt(2026, 11, 3)
        );
    }

    #[tokio::test]
    async fn test_plan_over_budget() {
        let estimate = plan_trip(&table(), &DisabledWeather, params(dec!(15000), 3))
            .await
            .unwrap();
        assert_eq!(estimate.verdict, BudgetVerdict::OverBudget { amount: dec!(3000) });
    }

    #[tokio::test]
    async fn test_pace_then_weather_advisories() {
        let estimate = plan_trip(&table(), &observed(36.0, "clear sky"), params(dec!(20000), 5))
            .await
            .unwrap();
        let kinds: Vec<AdvisoryKind> = estimate.advisories.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AdvisoryKind::PackedSchedule, AdvisoryKind::Heat]);
    }

    #[tokio::test]
    async fn test_rain_advisory_only() {
        let estimate = plan_trip(&table(), &observed(25.0, "light rain"), params(dec!(20000), 3))
            .await
            .unwrap();
        let kinds: Vec<AdvisoryKind> = estimate.advisories.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AdvisoryKind::Rain]);
    }

    #[tokio::test]
    async fn test_unknown_destination() {
        let mut p = params(dec!(20000), 3);
        p.destination = "Atlantis".to_string();

        let err = plan_trip(&table(), &DisabledWeather, p).await.unwrap_err();
        assert!(matches!(err, PlannerError::UnknownDestination(d) if d == "Atlantis"));
    }

    #[tokio::test]
    async fn test_invalid_size_is_rejected() {
        let mut p = params(dec!(20000), 3);
        p.occupancy = 0;

        let err = plan_trip(&table(), &DisabledWeather, p).await.unwrap_err();
        assert!(matches!(err, PlannerError::Estimate(_)));
    }

    #[tokio::test]
    async fn test_commit_then_regenerate_resets_expenses() {
        let store = SessionStore::new(Duration::from_secs(60));
        let estimate = plan_trip(&table(), &DisabledWeather, params(dec!(20000), 3))
            .await
            .unwrap();

        let session = commit_plan(&store, None, &estimate).await;
        let id = session.id;
        assert_eq!(session.trip.as_ref().map(|t| t.estimate), Some(dec!(18000)));

        let session = record_expense(
            &store,
            id,
            NewExpense {
                category: ExpenseCategory::Food,
                amount: dec!(450),
                note: "Dinner".to_string(),
                spent_on: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(session.expenses.len(), 1);

        let session = commit_plan(&store, Some(id), &estimate).await;
        assert_eq!(session.id, id);
        assert!(session.expenses.is_empty());
        assert!(store.get(id).await.unwrap().expenses.is_empty());
    }

    #[tokio::test]
    async fn test_commit_with_expired_session_starts_fresh() {
        let store = SessionStore::new(Duration::from_secs(60));
        let estimate = plan_trip(&table(), &DisabledWeather, params(dec!(20000), 3))
            .await
            .unwrap();

        let stale = Uuid::new_v4();
        let session = commit_plan(&store, Some(stale), &estimate).await;
        assert_ne!(session.id, stale);
    }

    #[tokio::test]
    async fn test_record_expense_unknown_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = Uuid::new_v4();
        let err = record_expense(
            &store,
            id,
            NewExpense {
                category: ExpenseCategory::Other,
                amount: dec!(10),
                note: String::new(),
                spent_on: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PlannerError::SessionNotFound(missing) if missing == id));
    }

    fn food(amount: Decimal) -> NewExpense {
        NewExpense {
            category: ExpenseCategory::Food,
            amount,
            note: String::new(),
            spent_on: None,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_expenses_are_all_recorded() {
        let store = SessionStore::new(Duration::from_secs(60));
        let estimate = plan_trip(&table(), &DisabledWeather, params(dec!(20000), 3))
            .await
            .unwrap();
        let id = commit_plan(&store, None, &estimate).await.id;
        let barrier = Arc::new(tokio::sync::Barrier::new(50));

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    record_expense(&store, id, food(dec!(10))).await
                })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }

        let session = store.get(id).await.unwrap();
        assert_eq!(session.expenses.len(), 50);
        assert_eq!(session.expense_summary().unwrap().total_spent, dec!(500));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_regenerate_during_expenses_keeps_reset() {
        let store = SessionStore::new(Duration::from_secs(60));
        let estimate = plan_trip(&table(), &DisabledWeather, params(dec!(20000), 3))
            .await
            .unwrap();
        let id = commit_plan(&store, None, &estimate).await.id;

        let writers: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { record_expense(&store, id, food(dec!(10))).await })
            })
            .collect();
        let regenerated = commit_plan(&store, Some(id), &estimate).await;
        for writer in writers {
            assert!(writer.await.unwrap().is_ok());
        }

        // The regenerated trip is never overwritten by a stale copy.
        let session = store.get(id).await.unwrap();
        assert_eq!(regenerated.id, id);
        assert_eq!(
            session.trip.as_ref().map(|t| t.created_at),
            regenerated.trip.as_ref().map(|t| t.created_at)
        );
        assert!(session.expenses.len() <= 20);
    }
}
