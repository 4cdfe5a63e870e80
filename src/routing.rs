//! Application router configuration.

use axum::{
    Extension, Router,
    routing::{get, put},
};

use crate::{
    AppState,
    dashboard::{get_dashboard_page, get_summary_endpoint},
    endpoints,
    health::get_db_test_endpoint,
    not_found::get_404_not_found,
    record::{
        RecordKind, create_record_endpoint, create_record_form_endpoint, delete_record_endpoint,
        delete_record_form_endpoint, get_edit_record_page, get_records_page,
        list_records_endpoint, update_record_endpoint, update_record_form_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        .route(endpoints::DB_TEST_API, get(get_db_test_endpoint));

    for kind in RecordKind::ALL {
        router = router.merge(record_routes(kind));
    }

    router.fallback(get_404_not_found).with_state(state)
}

/// The API and page routes for one kind of record.
///
/// Handlers find out which kind they serve through the [Extension] layer.
fn record_routes(kind: RecordKind) -> Router<AppState> {
    Router::new()
        .route(
            kind.collection_api(),
            get(list_records_endpoint).post(create_record_endpoint),
        )
        .route(
            kind.record_api(),
            put(update_record_endpoint).delete(delete_record_endpoint),
        )
        .route(
            kind.page_view(),
            get(get_records_page).post(create_record_form_endpoint),
        )
        .route(
            kind.form_endpoint(),
            put(update_record_form_endpoint).delete(delete_record_form_endpoint),
        )
        .route(kind.edit_view(), get(get_edit_record_page))
        .layer(Extension(kind))
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, endpoints};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn credit_lifecycle() {
        let server = get_test_server();

        let response = server
            .post(endpoints::CREDITS_API)
            .json(&json!({ "name": "Car", "amount": 100 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["data"]["_id"].as_i64().expect("missing id");

        let response = server
            .put(&endpoints::format_endpoint(endpoints::CREDIT_API, id))
            .json(&json!({ "name": "Car loan", "amount": 150.5 }))
            .await;
        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["data"]["name"], "Car loan");
        assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);

        let listed: Value = server.get(endpoints::CREDITS_API).await.json();
        assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(listed["data"][0]["amount"], 150.5);

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::CREDIT_API, id))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "ok": true, "message": "Credit deleted successfully" }));

        let listed: Value = server.get(endpoints::CREDITS_API).await.json();
        assert_eq!(listed["data"], json!([]));
    }

    #[tokio::test]
    async fn kinds_do_not_share_records() {
        let server = get_test_server();

        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({ "transaction": "Lunch", "amount": 12 }))
            .await
            .assert_status(StatusCode::CREATED);

        let pluses: Value = server.get(endpoints::PLUSES_API).await.json();
        let transactions: Value = server.get(endpoints::TRANSACTIONS_API).await.json();
        assert_eq!(pluses["data"], json!([]));
        assert_eq!(transactions["data"][0]["transaction"], "Lunch");
    }

    #[tokio::test]
    async fn body_without_json_content_type_is_accepted() {
        let server = get_test_server();

        let response = server
            .post(endpoints::GENERALS_API)
            .text(r#"{ "title": "Rent", "amount": 1200 }"#)
            .await;

        response.assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn invalid_body_is_rejected() {
        let server = get_test_server();

        let response = server
            .post(endpoints::GENERALS_API)
            .json(&json!({ "title": "", "amount": 1 }))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "ok": false, "message": "Title is required" }));
    }

    #[tokio::test]
    async fn non_integer_id_is_rejected() {
        let server = get_test_server();

        let response = server.delete("/api/pluses/not-a-number").await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn summary_reflects_created_records() {
        let server = get_test_server();
        for (title, amount) in [("הוצאות", 200), ("ציפים", 50), ("בד ביט", 30)] {
            server
                .post(endpoints::GENERALS_API)
                .json(&json!({ "title": title, "amount": amount }))
                .await
                .assert_status(StatusCode::CREATED);
        }
        server
            .post(endpoints::CREDITS_API)
            .json(&json!({ "name": "Car", "amount": 500 }))
            .await
            .assert_status(StatusCode::CREATED);

        let summary: Value = server.get(endpoints::SUMMARY_API).await.json();

        assert_eq!(summary["data"]["derived_metric"], 620.0);
        assert_eq!(summary["data"]["credits"]["total"], 500.0);
    }

    #[tokio::test]
    async fn db_test_reports_connection() {
        let server = get_test_server();

        let response = server.get(endpoints::DB_TEST_API).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "ok": true, "message": "Database connected successfully" }));
    }

    #[tokio::test]
    async fn pages_render() {
        let server = get_test_server();

        for page in [
            endpoints::DASHBOARD_VIEW,
            endpoints::CREDITS_VIEW,
            endpoints::PLUSES_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::GENERALS_VIEW,
        ] {
            server.get(page).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn form_create_then_edit_page() {
        let server = get_test_server();

        let response = server
            .post(endpoints::PLUSES_VIEW)
            .form(&[("label", "Bonus"), ("amount", "250")])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("hx-redirect", endpoints::PLUSES_VIEW);

        let listed: Value = server.get(endpoints::PLUSES_API).await.json();
        let id = listed["data"][0]["_id"].as_i64().expect("missing id");

        server
            .get(&endpoints::format_endpoint(endpoints::EDIT_PLUS_VIEW, id))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/definitely/not/a/page")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn error_page_has_no_route() {
        let server = get_test_server();

        server.get("/error").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn edit_page_for_missing_record_is_not_found() {
        let server = get_test_server();

        server
            .get(&endpoints::format_endpoint(endpoints::EDIT_GENERAL_VIEW, 404))
            .await
            .assert_status_not_found();
    }
}
