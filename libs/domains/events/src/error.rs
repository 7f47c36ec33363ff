use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    #[error("Base price exceeds max price")]
    InvalidPrices,

    #[error("Event end time precedes its schedule")]
    InvalidSchedule,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Access denied to event {0}")]
    Forbidden(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EventResult<T> = Result<T, EventError>;

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Convert EventError to AppError for standardized error responses
///
/// The cross-field rules report the offending fields in the `details`
/// object, in the same shape field-level validation failures use.
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(id) => AppError::NotFound(format!("Event {} not found", id)),
            EventError::InvalidPrices => {
                let error = field_error(
                    "prices",
                    "base_price must not exceed max_price unless max_price is 0",
                );
                let mut errors = ValidationErrors::new();
                errors.add("base_price".into(), error.clone());
                errors.add("max_price".into(), error);
                AppError::ValidationError(errors)
            }
            EventError::InvalidSchedule => {
                let mut errors = ValidationErrors::new();
                errors.add(
                    "end_event_at".into(),
                    field_error(
                        "schedule",
                        "end_event_at must not precede enrollment or event start times",
                    ),
                );
                AppError::ValidationError(errors)
            }
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::Forbidden(id) => {
                AppError::Forbidden(format!("Access denied to event {}", id))
            }
            EventError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejection_names_both_price_fields() {
        let app_error: AppError = EventError::InvalidPrices.into();
        match app_error {
            AppError::ValidationError(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("base_price"));
                assert!(fields.contains_key("max_price"));
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_schedule_rejection_names_end_event_at() {
        let app_error: AppError = EventError::InvalidSchedule.into();
        match app_error {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("end_event_at"));
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }
}
