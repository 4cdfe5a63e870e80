//! Dashboard HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    api_response::ApiResponse,
    dashboard::{
        aggregation::{DashboardSummary, summarize},
        cards::{derived_metric_card, kind_summary_card},
    },
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    record::{RecordKind, list_records},
};

/// The state needed for the dashboard page and summary endpoint.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with the grouped totals of every kind of record.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let summary = load_summary(&state)?;

    Ok(dashboard_view(&summary).into_response())
}

/// Respond with the dashboard figures as JSON.
pub async fn get_summary_endpoint(State(state): State<DashboardState>) -> Response {
    match load_summary(&state) {
        Ok(summary) => Json(ApiResponse::data(summary)).into_response(),
        Err(error) => error.into_json_response("Failed to fetch summary"),
    }
}

fn load_summary(state: &DashboardState) -> Result<DashboardSummary, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let fetch = |kind: RecordKind| {
        list_records(kind, &connection).inspect_err(|error| {
            tracing::error!("Failed to retrieve {}: {error}", kind.collection())
        })
    };

    let credits = fetch(RecordKind::Credit)?;
    let pluses = fetch(RecordKind::Plus)?;
    let transactions = fetch(RecordKind::Transaction)?;
    let generals = fetch(RecordKind::General)?;

    Ok(summarize(&credits, &pluses, &transactions, &generals))
}

fn dashboard_view(summary: &DashboardSummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Dashboard" }

                (derived_metric_card(summary.derived_metric))

                div class="grid grid-cols-1 sm:grid-cols-2 gap-4"
                {
                    (kind_summary_card(RecordKind::Transaction, &summary.transactions))
                    (kind_summary_card(RecordKind::Credit, &summary.credits))
                    (kind_summary_card(RecordKind::Plus, &summary.pluses))
                    (kind_summary_card(RecordKind::General, &summary.generals))
                }
            }
        }
    );

    base("Dashboard", &content)
}
