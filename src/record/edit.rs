//! Record editing page and endpoint.

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

use crate::{
    AppState, Error,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    record::{
        RecordForm, RecordId, RecordKind, get_record,
        page::{FormAction, record_form_view},
        update_record,
        validation::validate_form,
    },
};

/// The state needed for editing a record.
#[derive(Debug, Clone)]
pub struct EditRecordState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the record editing page, pre-filled with the record's fields.
pub async fn get_edit_record_page(
    Extension(kind): Extension<RecordKind>,
    Path(record_id): Path<RecordId>,
    State(state): State<EditRecordState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let record = get_record(kind, record_id, &connection).inspect_err(|error| {
        if *error != Error::NotFound {
            tracing::error!("Failed to retrieve {} {record_id}: {error}", kind.name());
        }
    })?;

    Ok(edit_record_view(kind, record_id, &RecordForm::from(&record), "").into_response())
}

/// Handle the record editing form submission.
pub async fn update_record_form_endpoint(
    Extension(kind): Extension<RecordKind>,
    Path(record_id): Path<RecordId>,
    State(state): State<EditRecordState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let fields = match validate_form(kind, &form) {
        Ok(fields) => fields,
        Err(error) => {
            return record_form_view(
                kind,
                FormAction::Update(record_id),
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

    match update_record(kind, record_id, fields, &connection) {
        Ok(Some(_)) => (
            HxRedirect(kind.page_view().to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Ok(None) => Error::NotFound.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating {} {record_id}: {error}",
                kind.name()
            );
            error.into_alert_response()
        }
    }
}

fn edit_record_view(
    kind: RecordKind,
    record_id: RecordId,
    form: &RecordForm,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(kind.page_view()).into_html();
    let form = record_form_view(kind, FormAction::Update(record_id), form, error_message);
    let cancel_url = kind.page_view();

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit " (kind.title()) }
            (form)
            a href=(cancel_url) class="mt-4 text-sm underline" { "Cancel" }
        }
    };

    base(&format!("Edit {}", kind.title()), &content)
}

#[cfg(test)]
mod edit_record_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension, Form,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        endpoints,
        record::{
            Record, RecordFields, RecordForm, RecordKind, create_record,
            edit::EditRecordState, get_edit_record_page, get_record, update_record_form_endpoint,
        },
        test_utils::{
            assert_form_error_message, assert_form_input_with_value,
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_hx_redirect,
            assert_valid_html, must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    fn get_state() -> EditRecordState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        EditRecordState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn insert(state: &EditRecordState, kind: RecordKind) -> Record {
        create_record(
            kind,
            RecordFields {
                label: "Groceries".to_owned(),
                amount: 82.4,
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create record")
    }

    #[tokio::test]
    async fn render_edit_page() {
        let state = get_state();
        let record = insert(&state, RecordKind::Transaction);

        let response = get_edit_record_page(
            Extension(RecordKind::Transaction),
            Path(record.id),
            State(state),
        )
        .await
        .expect("Could not render page");

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::TRANSACTION_FORM, record.id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "label", "text", "Groceries");
        assert_form_input_with_value(&form, "amount", "number", "82.4");
        assert_form_submit_button_with_text(&form, "Update Transaction");
    }

    #[tokio::test]
    async fn edit_page_for_missing_record_is_not_found() {
        let state = get_state();

        let response =
            get_edit_record_page(Extension(RecordKind::Credit), Path(999), State(state))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_redirects_to_manager_page() {
        let state = get_state();
        let record = insert(&state, RecordKind::General);
        let form = RecordForm {
            label: "Rent".to_owned(),
            amount: "1500".to_owned(),
        };

        let response = update_record_form_endpoint(
            Extension(RecordKind::General),
            Path(record.id),
            State(state.clone()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::GENERALS_VIEW);

        let got = get_record(
            RecordKind::General,
            record.id,
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not get record");
        assert_eq!(got.label, "Rent");
        assert_eq!(got.amount, 1500.0);
        assert_eq!(got.created_at, record.created_at);
    }

    #[tokio::test]
    async fn invalid_form_rerenders_with_error() {
        let state = get_state();
        let record = insert(&state, RecordKind::General);
        let form = RecordForm {
            label: "".to_owned(),
            amount: "1500".to_owned(),
        };

        let response = update_record_form_endpoint(
            Extension(RecordKind::General),
            Path(record.id),
            State(state.clone()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Title is required");
        assert_eq!(
            get_record(
                RecordKind::General,
                record.id,
                &state.db_connection.lock().unwrap()
            ),
            Ok(record)
        );
    }

    #[tokio::test]
    async fn update_missing_record_returns_not_found_alert() {
        let state = get_state();
        let form = RecordForm {
            label: "Rent".to_owned(),
            amount: "1".to_owned(),
        };

        let response = update_record_form_endpoint(
            Extension(RecordKind::General),
            Path(12345),
            State(state.clone()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get_record(RecordKind::General, 12345, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }
}
