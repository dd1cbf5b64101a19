//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Amount, CategoryId, Error, TransactionKind,
    api_json::ApiJson,
    auth::Claims,
    endpoints::{self, format_endpoint},
    transaction::{Transaction, TransactionState, core::create_transaction},
};

/// The request body for creating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    /// Text detailing the transaction.
    pub title: String,
    /// The value of the transaction.
    pub amount: Amount,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The category to file the transaction under.
    pub category_id: CategoryId,
    /// When the transaction happened as an RFC 3339 date-time, defaults to now.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

/// A route handler for creating a new transaction owned by the caller.
///
/// Responds with 201 Created, the new transaction, and its URI in the
/// `Location` header. Responds with 400 if the category is not one of the
/// caller's categories.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    claims: Claims,
    ApiJson(form): ApiJson<TransactionForm>,
) -> Result<Response, Error> {
    let mut builder = Transaction::build(&form.title, form.amount, form.kind, form.category_id);

    if let Some(date) = form.date {
        builder = builder.date(date);
    }

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(builder, claims.user_id, &connection)?;
    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response())
}
