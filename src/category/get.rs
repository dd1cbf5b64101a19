//! Endpoints for reading categories.

use axum::{
    Json,
    extract::State,
};

use crate::{
    api_path::ApiPath,
    CategoryId, Error,
    auth::Claims,
    category::{Category, CategoryState, get_categories, get_category},
};

/// A route handler for listing the caller's categories.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
    claims: Claims,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_categories(claims.user_id, &connection).map(Json)
}

/// A route handler for getting a category by its database ID.
///
/// Responds with 404 if the category does not exist, and also if it belongs
/// to another user so that unauthorized users cannot know whether another
/// user's resource exists.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    claims: Claims,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<Json<Category>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_category(category_id, claims.user_id, &connection).map(Json)
}
