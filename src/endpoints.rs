//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";
/// The route for the profile of the logged-in user.
pub const CURRENT_USER: &str = "/api/auth/me";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route for the total income, expenses and net balance.
pub const SUMMARY: &str = "/api/transactions/summary";
/// The route for the per-month totals.
pub const MONTHLY_SUMMARY: &str = "/api/transactions/summary/monthly";
/// The route for the spending per category.
pub const CATEGORY_SPENDING: &str = "/api/transactions/summary/by-category";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// Assumes that a parameter is an integer ID.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_endpoint("/api/categories/{category_id}", 1), "/api/categories/1");
/// ```
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
