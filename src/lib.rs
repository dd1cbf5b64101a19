//! A personal finance tracker.
//!
//! This library provides a JSON REST API for recording income and expenses
//! against user-defined categories, and for summarising those transactions
//! as totals, per-month breakdowns and per-category spending.
//!
//! Every resource belongs to exactly one user. Requests are authenticated
//! with a bearer token issued at log-in or registration.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod amount;
mod api_json;
mod api_path;
mod app_state;
mod auth;
mod category;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod password;
mod routing;
mod summary;
mod transaction;
mod transaction_kind;
mod user;

#[cfg(test)]
mod test_utils;

pub use amount::Amount;
pub use app_state::AppState;
pub use category::{Category, CategoryName, create_category, create_default_categories};
pub use database_id::{CategoryId, DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use transaction::{Transaction, TransactionBuilder, create_transaction};
pub use transaction_kind::TransactionKind;
pub use user::{NewUser, User, UserID, create_user, get_user_by_id};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password combination did not match a registered user.
    ///
    /// The same error is used for an unknown email and a wrong password so
    /// that clients cannot probe for registered email addresses.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// The bearer token was missing, malformed, signed with the wrong key or
    /// has expired.
    #[error("missing, invalid or expired token")]
    InvalidToken,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The string used for an email address is not a valid email address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// An empty string was used as a user's first name.
    #[error("first name cannot be empty")]
    EmptyFirstName,

    /// An empty string was used as the title of a transaction.
    #[error("transaction title cannot be empty")]
    EmptyTitle,

    /// The magnitude of a transaction amount is larger than [Amount::MAX_WHOLE_UNITS].
    #[error("amount must be between -{max} and {max}", max = Amount::MAX_WHOLE_UNITS)]
    AmountOutOfRange,

    /// The path of the request has a parameter that could not be parsed,
    /// e.g. an ID that is not an integer.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The request body could not be parsed as the expected JSON object.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The category ID used to create a transaction did not match a category
    /// owned by the user.
    #[error("the category ID {0} does not refer to a valid category")]
    InvalidCategory(CategoryId),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The email address is already used by another user.
    #[error("the email address is already in use")]
    DuplicateEmail,

    /// Tried to delete a category that transactions still refer to.
    #[error("the category is used by one or more transactions")]
    CategoryInUse,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The auth token could not be encoded.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPath(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidCredentials | Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::TooWeak(_)
            | Error::InvalidEmail(_)
            | Error::EmptyFirstName
            | Error::EmptyTitle
            | Error::AmountOutOfRange
            | Error::InvalidPath(_)
            | Error::EmptyCategoryName
            | Error::InvalidRequestBody(_)
            | Error::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::DuplicateEmail | Error::CategoryInUse => StatusCode::CONFLICT,
            Error::HashingError(_)
            | Error::TokenCreation(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "an unexpected error occurred, check the server logs for more details".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
