use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use async_graphql::ErrorExtensions;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

use crate::pagination::PaginationError;

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("authentication required")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Database(DbErr),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Machine-readable code sent to GraphQL clients in `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "BAD_USER_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized => "UNAUTHENTICATED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Database(DbErr::RecordNotFound(_)) => "NOT_FOUND",
            AppError::Database(_) | AppError::Io(_) | AppError::Config(_) => "INTERNAL",
        }
    }

    /// Message safe to hand to clients. Internal failures are logged in full
    /// and replaced by a generic text.
    pub fn public_message(&self) -> String {
        if self.code() == "INTERNAL" {
            error!("{}", self);
            return INTERNAL_MESSAGE.to_string();
        }
        self.to_string()
    }
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(sql) => sql.into(),
            None => AppError::Database(e),
        }
    }
}

/// Constraint violations are caused by the request, not the server.
impl From<SqlErr> for AppError {
    fn from(e: SqlErr) -> Self {
        match e {
            SqlErr::UniqueConstraintViolation(_) => AppError::InvalidArgument(
                "a record with the same unique value already exists".to_string(),
            ),
            SqlErr::ForeignKeyConstraintViolation(_) => {
                AppError::InvalidArgument("a referenced record does not exist".to_string())
            }
            other => AppError::Database(DbErr::Custom(other.to_string())),
        }
    }
}

impl From<PaginationError> for AppError {
    fn from(e: PaginationError) -> Self {
        match e {
            PaginationError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.public_message())
            .extend_with(|_, e| e.set("code", self.code()))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            "BAD_USER_INPUT" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "UNAUTHENTICATED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.public_message(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn constraint_violations_are_user_errors() {
        let dup: AppError =
            SqlErr::UniqueConstraintViolation("duplicate key \"brands_name_key\"".into()).into();
        assert_eq!(dup.code(), "BAD_USER_INPUT");
        assert!(!dup.public_message().contains("brands_name_key"));

        let fk: AppError = SqlErr::ForeignKeyConstraintViolation("deals_brand_id_fkey".into()).into();
        assert_eq!(fk.code(), "BAD_USER_INPUT");
    }

    #[test]
    fn internal_errors_hide_driver_text() {
        let err: AppError = DbErr::Query(RuntimeErr::Internal(
            "relation \"deals\" does not exist".to_string(),
        ))
        .into();
        assert_eq!(err.code(), "INTERNAL");
        assert_eq!(err.public_message(), INTERNAL_MESSAGE);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_record_stays_not_found() {
        let err: AppError = DbErr::RecordNotFound("deal".to_string()).into();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
