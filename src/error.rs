//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::planner::responses::PlannerErrorResponse;
use crate::planner::services::PlannerError;
use crate::session::SessionError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and the message safe to show to the user
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Page not found".to_string()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Planner(e) => {
                let status = match e {
                    PlannerError::UnknownDestination(_) => StatusCode::BAD_REQUEST,
                    PlannerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
                    PlannerError::Estimate(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    PlannerError::Session(SessionError::NoTrip) => StatusCode::CONFLICT,
                    PlannerError::Session(SessionError::NonPositiveAmount(_)) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                };
                tracing::warn!("Planner error: {}", e);
                (status, e.to_string())
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::NotFound => "not_found",
            AppError::Validation(_) => "validation",
            AppError::Planner(PlannerError::UnknownDestination(_)) => "unknown_destination",
            AppError::Planner(PlannerError::SessionNotFound(_)) => "session_not_found",
            AppError::Planner(PlannerError::Estimate(_)) => "invalid_trip",
            AppError::Planner(PlannerError::Session(SessionError::NoTrip)) => "no_trip",
            AppError::Planner(PlannerError::Session(SessionError::NonPositiveAmount(_))) => {
                "invalid_expense"
            }
            AppError::Template(_) | AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Return simple HTML error page
        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><title>{} - Trip Planner</title></head>
<body style="font-family: sans-serif; text-align: center; padding: 50px;">
    <h1>{}</h1>
    <p>{}</p>
    <a href="/">Back to the planner</a>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            escape_html(&message)
        );

        (status, axum::response::Html(html)).into_response()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `AppError` rendered as JSON for the `/api` routes
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        ApiError(AppError::Planner(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        let body = PlannerErrorResponse {
            error_type: self.0.error_type().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
