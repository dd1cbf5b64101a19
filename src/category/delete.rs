//! Category deletion endpoint.

use axum::{
    extract::State,
    http::StatusCode,
};

use crate::{
    api_path::ApiPath,
    CategoryId, Error,
    auth::Claims,
    category::{CategoryState, db::delete_category},
};

/// A route handler for deleting one of the caller's categories.
///
/// Responds with 204 No Content on success, 404 if the category does not
/// exist or belongs to another user, and 409 Conflict if transactions still
/// refer to the category.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    claims: Claims,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    delete_category(category_id, claims.user_id, &connection)?;
    tracing::debug!("Deleted category {category_id} for user {}", claims.user_id);

    Ok(StatusCode::NO_CONTENT)
}
