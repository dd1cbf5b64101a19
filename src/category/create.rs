//! Category creation endpoint.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    api_json::ApiJson,
    auth::Claims,
    category::{CategoryForm, CategoryName, CategoryState, create_category},
    endpoints::{self, format_endpoint},
};

/// A route handler for creating a new category owned by the caller.
///
/// Responds with 201 Created, the new category, and its URI in the `Location` header.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    claims: Claims,
    ApiJson(form): ApiJson<CategoryForm>,
) -> Result<Response, Error> {
    let name = CategoryName::new(&form.name)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category = create_category(name, form.kind, claims.user_id, &connection)?;
    let location = format_endpoint(endpoints::CATEGORY, category.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(category)).into_response())
}
