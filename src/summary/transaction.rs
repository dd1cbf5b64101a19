//! Database queries for retrieving the transaction data used in summaries.
//!
//! Summaries only need the amount, kind, date and category name of each
//! transaction, so this module loads a slimmer view than
//! [crate::Transaction].

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{Amount, Error, TransactionKind, UserID};

/// A simplified transaction view for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SummaryTransaction {
    pub amount: Amount,
    pub kind: TransactionKind,
    pub date: OffsetDateTime,
    /// `None` for a transaction that is not filed under a category.
    pub category_name: Option<String>,
}

/// Gets all of a user's transactions along with their category names.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails.
pub(super) fn get_summary_transactions(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<SummaryTransaction>, Error> {
    connection
        .prepare(
            "SELECT t.amount, t.kind, t.date, category.name
            FROM \"transaction\" t
            LEFT JOIN category ON category.id = t.category_id
            WHERE t.user_id = :user_id",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            Ok(SummaryTransaction {
                amount: row.get(0)?,
                kind: row.get(1)?,
                date: row.get(2)?,
                category_name: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<SummaryTransaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
