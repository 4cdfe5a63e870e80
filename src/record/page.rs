//! The record manager pages: list, create and delete records from the browser.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use time::{UtcOffset, macros::format_description};

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links,
        format_currency,
    },
    navigation::NavBar,
    record::{
        Record, RecordForm, RecordId, RecordKind, create_record, delete_record, list_records,
        validation::validate_form,
    },
    timezone::get_local_offset,
};

/// The state needed for the record manager pages.
#[derive(Debug, Clone)]
pub struct RecordPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for RecordPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the manager page for one kind of record.
pub async fn get_records_page(
    Extension(kind): Extension<RecordKind>,
    State(state): State<RecordPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let records = list_records(kind, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve {}: {error}", kind.collection()))?;

    Ok(records_view(kind, &records, local_offset).into_response())
}

/// Handle the "add new record" form on the manager page.
pub async fn create_record_form_endpoint(
    Extension(kind): Extension<RecordKind>,
    State(state): State<RecordPageState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let fields = match validate_form(kind, &form) {
        Ok(fields) => fields,
        Err(error) => {
            return record_form_view(
                kind,
                FormAction::Create,
                &form,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_record(kind, fields, &connection) {
        Ok(_) => (
            HxRedirect(kind.page_view().to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while creating a {}: {error}",
                kind.name()
            );

            error.into_alert_response()
        }
    }
}

/// Handle the delete button on the manager page. Returns a success alert or error.
pub async fn delete_record_form_endpoint(
    Extension(kind): Extension<RecordKind>,
    Path(record_id): Path<RecordId>,
    State(state): State<RecordPageState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_record(kind, record_id, &connection) {
        Ok(_) => Alert::SuccessSimple {
            message: format!("{} deleted successfully", kind.title()),
        }
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting {} {record_id}: {error}",
                kind.name()
            );
            error.into_alert_response()
        }
    }
}

/// Whether a record form creates a new record or replaces an existing one.
#[derive(Debug, Clone, Copy)]
pub(super) enum FormAction {
    Create,
    Update(RecordId),
}

/// The form shared by the manager and edit pages.
///
/// Swaps itself out when the server re-renders it with a validation error.
pub(super) fn record_form_view(
    kind: RecordKind,
    action: FormAction,
    form: &RecordForm,
    error_message: &str,
) -> Markup {
    let (hx_post, hx_put, submit_text) = match action {
        FormAction::Create => (
            Some(kind.page_view().to_owned()),
            None,
            format!("Add {}", kind.title()),
        ),
        FormAction::Update(record_id) => (
            None,
            Some(endpoints::format_endpoint(kind.form_endpoint(), record_id)),
            format!("Update {}", kind.title()),
        ),
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="label"
                    class=(FORM_LABEL_STYLE)
                {
                    (kind.label_caption())
                }

                input
                    id="label"
                    type="text"
                    name="label"
                    placeholder=(kind.label_caption())
                    value=(form.label)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    placeholder="0.00"
                    value=(form.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }
        }
    }
}

fn records_view(kind: RecordKind, records: &[Record], local_offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(kind.page_view()).into_html();
    let form = record_form_view(kind, FormAction::Create, &RecordForm::default(), "");
    let date_format = format_description!("[year]-[month]-[day] [hour]:[minute]");

    let table_row = |record: &Record| {
        let edit_url = endpoints::format_endpoint(kind.edit_view(), record.id);
        let delete_url = endpoints::format_endpoint(kind.form_endpoint(), record.id);
        let confirm_message = format!("Are you sure you want to delete this {}?", kind.name());
        let created_at = record
            .created_at
            .to_offset(local_offset)
            .format(date_format)
            .unwrap_or_default();

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (record.label) }
                td class=(TABLE_CELL_STYLE) { (format_currency(record.amount)) }
                td class=(TABLE_CELL_STYLE) { (created_at) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-6 w-full max-w-5xl"
            {
                h1 class="text-xl font-bold" { (kind.title()) " Manager" }

                section class="max-w-md"
                {
                    h2 class="text-lg font-semibold mb-4" { "Add New " (kind.title()) }

                    (form)
                }

                section class="dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { (kind.label_caption()) }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Created" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for record in records {
                                (table_row(record))
                            }

                            @if records.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No " (kind.collection()) " yet. Add one above!"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base(&format!("{} Manager", kind.title()), &content)
}
