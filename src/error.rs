// Type d'erreur commun à toutes les routes.
// Chaque handler retourne Result<_, AppError> ; l'impl ResponseError
// transforme l'erreur en réponse JSON avec le bon status HTTP.

use std::borrow::Cow;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }

    /// Erreur de validation sur un seul champ (ex: email déjà utilisé)
    pub fn field(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, field_error(code, message));
        AppError::Validation(errors)
    }
}

pub fn field_error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message.into()));
    error
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => HttpResponse::BadRequest().json(errors),
            AppError::Database(e) => {
                // Le détail SQL reste dans les logs
                tracing::error!(error = %e, "database error");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Database error"
                }))
            }
            other => HttpResponse::build(other.status_code()).json(serde_json::json!({
                "error": other.to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("Portfolio").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Forbidden("nope".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::field("email", "unique", "taken").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_field_error_keeps_message() {
        match AppError::field("email", "unique", "Email already used") {
            AppError::Validation(errors) => {
                let by_field = errors.field_errors();
                let email = by_field.get("email").unwrap();
                assert_eq!(email[0].code, "unique");
                assert_eq!(email[0].message.as_deref(), Some("Email already used"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
