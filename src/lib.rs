//! Ledgerly is a personal-finance bookkeeping API.
//!
//! This library provides a REST API for registering users, recording their
//! income and expense transactions, and computing monthly balances. All
//! records live in in-memory stores behind the [stores::UserStore] and
//! [stores::TransactionStore] contracts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::signal;

pub mod endpoints;
mod logging;
pub mod models;
mod routing;
pub mod seed;
mod state;
pub mod stores;
pub mod transaction;
pub mod user;

pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use state::AppState;

use crate::models::{TransactionID, UserID};

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
    /// The caller referenced a user ID that does not exist.
    #[error("no user found with the ID {0}")]
    UserNotFound(UserID),

    /// The email used to create or update a user is already taken by another
    /// user.
    #[error("a user with the email \"{0}\" already exists")]
    UserAlreadyExists(String),

    /// The caller tried to delete a user that still owns transactions.
    #[error("the user with the ID {0} still owns transactions")]
    UserHasTransactions(UserID),

    /// The caller referenced a transaction ID that does not exist.
    #[error("no transaction found with the ID {0}")]
    TransactionNotFound(TransactionID),

    /// The transaction exists but is not owned by the calling user, or has no
    /// recorded owner.
    ///
    /// This error is surfaced with not-found semantics so that a non-owner
    /// cannot confirm the transaction's existence.
    #[error("access to the transaction with the ID {0} was denied")]
    TransactionAccessDenied(TransactionID),

    /// The request carried a field, header, or query parameter that failed
    /// validation before reaching the manager layer.
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// The machine-readable error code reported to API clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::UserNotFound(_) => "USER_NOT_FOUND",
            Error::UserAlreadyExists(_) => "USER_ALREADY_EXISTS",
            Error::UserHasTransactions(_) => "USER_HAS_TRANSACTIONS",
            // Access-denied deliberately reports not-found so the existence of
            // another user's transaction is not confirmed.
            Error::TransactionNotFound(_) | Error::TransactionAccessDenied(_) => {
                "TRANSACTION_NOT_FOUND"
            }
            Error::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// The HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::UserNotFound(_)
            | Error::TransactionNotFound(_)
            | Error::TransactionAccessDenied(_) => StatusCode::NOT_FOUND,
            Error::UserAlreadyExists(_) | Error::UserHasTransactions(_) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// The problem document returned to API clients when a request fails.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProblemDetail {
    status: u16,
    detail: String,
    error_code: &'static str,
    timestamp: OffsetDateTime,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let problem = ProblemDetail {
            status: status.as_u16(),
            detail: self.to_string(),
            error_code: self.error_code(),
            timestamp: OffsetDateTime::now_utc(),
        };

        (status, Json(problem)).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;

    use crate::models::{TransactionID, UserID};

    use super::Error;

    #[test]
    fn not_found_errors_map_to_404() {
        let errors = [
            Error::UserNotFound(UserID::new(1)),
            Error::TransactionNotFound(TransactionID::new(2)),
            Error::TransactionAccessDenied(TransactionID::new(3)),
        ];

        for error in errors {
            assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn conflict_errors_map_to_409() {
        let errors = [
            Error::UserAlreadyExists("a@b.com".to_owned()),
            Error::UserHasTransactions(UserID::new(1)),
        ];

        for error in errors {
            assert_eq!(error.status_code(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn access_denied_reports_not_found_code() {
        let error = Error::TransactionAccessDenied(TransactionID::new(7));

        assert_eq!(error.error_code(), "TRANSACTION_NOT_FOUND");
    }
}
