use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{status, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

/// Errors produced by the leaderboard store.
///
/// Validation errors are the caller's fault and surface as 400s;
/// storage errors mean the persistence layer failed and surface as
/// 500s after being logged.
#[derive(Debug)]
pub enum StoreError {
    Validation(String),
    Storage(sqlx::Error),
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(detail) => write!(f, "invalid input: {}", detail),
            Self::Storage(error) => write!(f, "storage failure: {}", error),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::Storage(error)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
}

impl<'r> Responder<'r, 'static> for StoreError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        let (code, body) = match self {
            StoreError::Validation(detail) => (
                Status::BadRequest,
                ErrorBody {
                    error: "validation error".to_owned(),
                    detail,
                },
            ),
            StoreError::Storage(error) => {
                log::error!("storage failure: {}", error);
                (
                    Status::InternalServerError,
                    ErrorBody {
                        error: "storage error".to_owned(),
                        detail: "the operation could not be completed".to_owned(),
                    },
                )
            }
        };
        status::Custom(code, Json(body)).respond_to(request)
    }
}

pub type RequestResult<T, E = StoreError> = std::result::Result<T, E>;
