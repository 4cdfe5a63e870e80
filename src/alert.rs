//! Alert system for displaying success and error messages to users.
//!
//! Alerts replace the page's alert container out-of-band, so they show up
//! whichever element the htmx request targeted.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone)]
pub enum Alert {
    /// A success message without details.
    SuccessSimple { message: String },
    /// An error message with a hint on what to do about it.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::SuccessSimple { message } => (
                "flex items-start p-4 rounded-lg shadow text-green-800 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
                message,
                None,
            ),
            Alert::Error { message, details } => (
                "flex items-start p-4 rounded-lg shadow text-red-800 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                Some(details),
            ),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    div class="flex-1"
                    {
                        p class="text-sm font-medium" { (message) }

                        @if let Some(details) = details {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="ms-3 text-sm font-semibold"
                        aria-label="Close"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        alert::Alert,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn success_alert_renders_message() {
        let response = Alert::SuccessSimple {
            message: "Credit deleted successfully".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let message = html
            .select(&Selector::parse("#alert-container p.text-sm.font-medium").unwrap())
            .next()
            .expect("No alert message found")
            .text()
            .collect::<String>();
        assert_eq!(message, "Credit deleted successfully");
    }

    #[tokio::test]
    async fn error_alert_renders_details() {
        let response = Alert::Error {
            message: "Invalid input".to_owned(),
            details: "Title is required".to_owned(),
        }
        .into_response();

        let html = parse_html_fragment(response).await;
        let paragraphs: Vec<String> = html
            .select(&Selector::parse("#alert-container p").unwrap())
            .map(|p| p.text().collect())
            .collect();
        assert_eq!(paragraphs, vec!["Invalid input", "Title is required"]);
    }
}
