//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/credit/{record_id}/edit', use [format_endpoint].

/// The landing page with the dashboard.
pub const DASHBOARD_VIEW: &str = "/";
/// The page for managing credits.
pub const CREDITS_VIEW: &str = "/credit";
/// The route for updating or deleting a credit from the credits page.
pub const CREDIT_FORM: &str = "/credit/{record_id}";
/// The page for editing a credit.
pub const EDIT_CREDIT_VIEW: &str = "/credit/{record_id}/edit";
/// The page for managing pluses.
pub const PLUSES_VIEW: &str = "/plus";
/// The route for updating or deleting a plus from the pluses page.
pub const PLUS_FORM: &str = "/plus/{record_id}";
/// The page for editing a plus.
pub const EDIT_PLUS_VIEW: &str = "/plus/{record_id}/edit";
/// The page for managing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The route for updating or deleting a transaction from the transactions page.
pub const TRANSACTION_FORM: &str = "/transactions/{record_id}";
/// The page for editing a transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{record_id}/edit";
/// The page for managing general entries.
pub const GENERALS_VIEW: &str = "/general";
/// The route for updating or deleting a general entry from the generals page.
pub const GENERAL_FORM: &str = "/general/{record_id}";
/// The page for editing a general entry.
pub const EDIT_GENERAL_VIEW: &str = "/general/{record_id}/edit";

/// The route to list or create credits.
pub const CREDITS_API: &str = "/api/credits";
/// The route to update or delete a single credit.
pub const CREDIT_API: &str = "/api/credits/{record_id}";
/// The route to list or create pluses.
pub const PLUSES_API: &str = "/api/pluses";
/// The route to update or delete a single plus.
pub const PLUS_API: &str = "/api/pluses/{record_id}";
/// The route to list or create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION_API: &str = "/api/transactions/{record_id}";
/// The route to list or create general entries.
pub const GENERALS_API: &str = "/api/generals";
/// The route to update or delete a single general entry.
pub const GENERAL_API: &str = "/api/generals/{record_id}";
/// The route for the aggregated dashboard figures.
pub const SUMMARY_API: &str = "/api/summary";
/// The route for checking that the database is reachable.
pub const DB_TEST_API: &str = "/api/db-test";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/credit/{record_id}', '{record_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
