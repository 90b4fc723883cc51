use crate::config::ConfigError;
use crate::questionnaire::{AnswerImportError, BankError, NarrativeError, SessionError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Narrative(NarrativeError),
    Import(AnswerImportError),
    Session(SessionError),
    Catalogue(BankError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Narrative(err) => write!(f, "narrative client error: {}", err),
            AppError::Import(err) => write!(f, "answer import error: {}", err),
            AppError::Session(err) => write!(f, "session error: {}", err),
            AppError::Catalogue(err) => write!(f, "catalogue error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Narrative(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Session(err) => Some(err),
            AppError::Catalogue(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_) | AppError::Session(_) => StatusCode::BAD_REQUEST,
            AppError::Catalogue(BankError::OutOfRange { .. }) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Narrative(_)
            | AppError::Catalogue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<NarrativeError> for AppError {
    fn from(value: NarrativeError) -> Self {
        Self::Narrative(value)
    }
}

impl From<AnswerImportError> for AppError {
    fn from(value: AnswerImportError) -> Self {
        Self::Import(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<BankError> for AppError {
    fn from(value: BankError) -> Self {
        Self::Catalogue(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{AnswerError, ItemId};

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = AppError::from(AnswerImportError::Answer(AnswerError::UnknownItem(ItemId(40))));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn out_of_range_maps_to_not_found() {
        let err = AppError::from(BankError::OutOfRange {
            index: 31,
            count: 30,
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn display_prefixes_the_layer() {
        let err = AppError::from(NarrativeError::EmptyResponse);
        assert_eq!(
            err.to_string(),
            "narrative client error: narrative response was empty"
        );
    }
}
