//! The API endpoints URIs.
//!
//! Tests that call endpoints with a parameter, e.g., '/api/user/{user_id}', fill it in with
//! `format_endpoint`.

/// The route for generating a grocery list from a budget.
pub const BUDGET: &str = "/api/budget";
/// The route for saving a grocery list.
pub const SAVE_LIST: &str = "/api/save-list";
/// The route for getting the grocery lists a user has saved.
pub const USER_LISTS: &str = "/api/user/{user_id}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter starts with a left brace and ends with a right brace.
/// For example, in the endpoint path '/api/user/{user_id}', '{user_id}' is the parameter.
///
/// Only the first parameter is replaced. `value` is inserted as is, so it
/// should already be safe to use in a URI path.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
