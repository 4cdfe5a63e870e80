//! REST API endpoints for records.
//!
//! Every kind of record shares these handlers. The router attaches the
//! [RecordKind] to each route as an [Extension].

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::Value;

use crate::{
    AppState, Error,
    api_response::ApiResponse,
    record::{
        RecordKind, create_record, delete_record, list_records, update_record,
        validation::{parse_record_id, validate_json},
    },
};

/// The state needed for the record API endpoints.
#[derive(Debug, Clone)]
pub struct RecordApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecordApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Respond with every record of the kind, newest first.
pub async fn list_records_endpoint(
    Extension(kind): Extension<RecordKind>,
    State(state): State<RecordApiState>,
) -> Response {
    let result = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| list_records(kind, &connection));

    match result {
        Ok(records) => Json(ApiResponse::data(records)).into_response(),
        Err(error) => error.into_json_response(&format!("Failed to fetch {}", kind.collection())),
    }
}

/// Validate the JSON body and create a record, responding with 201 Created.
pub async fn create_record_endpoint(
    Extension(kind): Extension<RecordKind>,
    State(state): State<RecordApiState>,
    body: Bytes,
) -> Response {
    let result = serde_json::from_slice::<Value>(&body)
        .map_err(Error::from)
        .and_then(|body| validate_json(kind, &body))
        .and_then(|fields| {
            let connection = state
                .db_connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| Error::DatabaseLockError)?;

            create_record(kind, fields, &connection)
        });

    match result {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::with_message(
                format!("{} created successfully", kind.title()),
                record,
            )),
        )
            .into_response(),
        Err(error) => error.into_json_response(&format!("Failed to create {}", kind.name())),
    }
}

/// Validate the JSON body and replace the fields of a record.
///
/// An ID that matches no record is not an error: the response reports success
/// with `null` data.
pub async fn update_record_endpoint(
    Extension(kind): Extension<RecordKind>,
    State(state): State<RecordApiState>,
    Path(record_id): Path<String>,
    body: Bytes,
) -> Response {
    let result = parse_record_id(&record_id).and_then(|record_id| {
        let body = serde_json::from_slice::<Value>(&body)?;
        let fields = validate_json(kind, &body)?;
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        update_record(kind, record_id, fields, &connection)
    });

    match result {
        Ok(record) => {
            if record.is_none() {
                tracing::debug!("update of missing {} {record_id} ignored", kind.name());
            }

            Json(ApiResponse::with_message(
                format!("{} updated successfully", kind.title()),
                record,
            ))
            .into_response()
        }
        Err(error) => error.into_json_response(&format!("Failed to update {}", kind.name())),
    }
}

/// Delete a record. Succeeds whether or not the record existed.
pub async fn delete_record_endpoint(
    Extension(kind): Extension<RecordKind>,
    State(state): State<RecordApiState>,
    Path(record_id): Path<String>,
) -> Response {
    let result = parse_record_id(&record_id).and_then(|record_id| {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        delete_record(kind, record_id, &connection)
    });

    match result {
        Ok(_) => Json(ApiResponse::message(format!(
            "{} deleted successfully",
            kind.title()
        )))
        .into_response(),
        Err(error) => error.into_json_response(&format!("Failed to delete {}", kind.name())),
    }
}
