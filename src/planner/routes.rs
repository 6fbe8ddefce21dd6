//! JSON API routes for the planner, mounted under `/api`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::{ApiError, AppError};
use crate::AppState;

use super::requests::{AddExpenseRequest, PlanTripRequest};
use super::responses::{DestinationResponse, EstimateResponse, PlanResponse, SessionResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/destinations", get(list_destinations))
        .route("/estimate", post(estimate))
        .route("/trips", post(create_trip))
        .route("/trips/:id", get(get_trip).delete(delete_trip))
        .route("/trips/:id/expenses", post(add_expense))
}

async fn list_destinations(State(state): State<AppState>) -> Json<Vec<DestinationResponse>> {
    Json(
        state
            .rates
            .rows()
            .iter()
            .map(|rates| DestinationResponse::new(rates, &state.currency))
            .collect(),
    )
}

/// Stateless estimate; nothing is stored.
async fn estimate(
    State(state): State<AppState>,
    Json(req): Json<PlanTripRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    req.validate().map_err(AppError::Validation)?;

    let estimate =
        services::plan_trip(&state.rates, state.weather.as_ref(), req.into_params()).await?;
    Ok(Json(EstimateResponse::new(&estimate, &state.currency)))
}

/// Generate a plan into a (new or existing) session.
async fn create_trip(
    State(state): State<AppState>,
    Json(req): Json<PlanTripRequest>,
) -> Result<(StatusCode, Json<PlanResponse>), ApiError> {
    req.validate().map_err(AppError::Validation)?;

    let session_id = req.session_id;
    let estimate =
        services::plan_trip(&state.rates, state.weather.as_ref(), req.into_params()).await?;
    let session = services::commit_plan(&state.sessions, session_id, &estimate).await;

    Ok((
        StatusCode::CREATED,
        Json(PlanResponse {
            session_id: session.id,
            estimate: EstimateResponse::new(&estimate, &state.currency),
        }),
    ))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or(services::PlannerError::SessionNotFound(id))?;
    Ok(Json(SessionResponse::new(&session, &state.currency)))
}

/// End a planning session and drop its expenses.
async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(services::PlannerError::SessionNotFound(id).into())
    }
}

async fn add_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = services::record_expense(&state.sessions, id, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(&session, &state.currency)),
    ))
}
