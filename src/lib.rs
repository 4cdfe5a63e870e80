//! Pocket Ledger is a small web app for keeping track of credits, pluses,
//! transactions and general entries.
//!
//! This library provides a JSON REST API for each record kind, HTML pages for
//! managing the records, and a dashboard that groups and sums them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api_response;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod health;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod record;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use record::{Record, RecordFields, RecordId, RecordKind, create_record, list_records};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::{
    alert::Alert, api_response::ApiResponse, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

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
    /// The identifying field of a record (name, title or transaction
    /// description) was missing, empty or not a string.
    #[error("{}", .0.label_required_message())]
    InvalidLabel(RecordKind),

    /// The amount of a record was missing or not a number.
    #[error("Amount is required and must be a number")]
    InvalidAmount,

    /// The request body could not be parsed as JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// The record ID in the request path is not an integer.
    #[error("\"{0}\" is not a valid record ID")]
    InvalidRecordId(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::InvalidJson(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Whether the error was caused by malformed client input.
    fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidLabel(_)
                | Error::InvalidAmount
                | Error::InvalidJson(_)
                | Error::InvalidRecordId(_)
        )
    }

    /// Convert the error into a JSON envelope for the REST API.
    ///
    /// Validation errors become a 400 with the error as the message. Everything
    /// else is a store failure: a 500 with `failure_message` as the message and
    /// the underlying error text in `error`.
    fn into_json_response(self, failure_message: &str) -> Response {
        if self.is_validation_error() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::failure(self.to_string(), None)),
            )
                .into_response();
        }

        tracing::error!("{failure_message}: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::failure(
                failure_message,
                Some(self.to_string()),
            )),
        )
            .into_response()
    }

    fn into_alert_response(self) -> Response {
        match self {
            error if error.is_validation_error() => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid input".to_owned(),
                    details: error.to_string(),
                },
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not find the record".to_owned(),
                    details: "Try refreshing the page to see if the record has been deleted."
                        .to_owned(),
                },
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                },
            )
                .into_response(),
        }
    }
}
