//! Database connectivity check.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, api_response::ApiResponse};

/// The state needed for the database check.
#[derive(Debug, Clone)]
pub struct HealthState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HealthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Make a round trip to the database and report whether it worked.
pub async fn get_db_test_endpoint(State(state): State<HealthState>) -> Response {
    match ping(&state) {
        Ok(()) => Json(ApiResponse::message("Database connected successfully")).into_response(),
        Err(error) => {
            tracing::error!("Database check failed: {error}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::failure(
                    "Database connection failed",
                    Some(error.to_string()),
                )),
            )
                .into_response()
        }
    }
}

fn ping(state: &HealthState) -> Result<(), Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;

    Ok(())
}
