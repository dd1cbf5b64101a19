use axum::{
    extract::State,
    http::StatusCode,
};

use crate::{
    api_path::ApiPath,
    Error, TransactionId,
    auth::Claims,
    transaction::{TransactionState, core::delete_transaction},
};

/// A route handler for deleting one of the caller's transactions.
///
/// Responds with 204 No Content on success, or 404 if the transaction does
/// not exist or belongs to another user.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    claims: Claims,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    match delete_transaction(transaction_id, claims.user_id, &connection)? {
        0 => Err(Error::NotFound),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}
