//! Endpoints for reading transactions.

use axum::{
    Json,
    extract::State,
};

use crate::{
    api_path::ApiPath,
    Error, TransactionId,
    auth::Claims,
    transaction::{Transaction, TransactionState, get_transaction, get_transactions},
};

/// A route handler for listing the caller's transactions, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    claims: Claims,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_transactions(claims.user_id, &connection).map(Json)
}

/// A route handler for getting a transaction by its database ID.
///
/// Responds with 404 if the transaction does not exist, and also if it
/// belongs to another user so that unauthorized users cannot know whether
/// another user's resource exists.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    claims: Claims,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_transaction(transaction_id, claims.user_id, &connection).map(Json)
}
