//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Amount, CategoryId, Error, TransactionId, TransactionKind, UserID,
    category::{CategoryName, get_category},
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the transaction happened, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// The name of the category the transaction belongs to.
    pub category_name: CategoryName,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        amount: Amount,
        kind: TransactionKind,
        category_id: CategoryId,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            amount,
            kind,
            category_id,
            date: OffsetDateTime::now_utc(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The date defaults to the time the builder was created.
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// let transaction = Transaction::build("Coffee", "4.50".parse()?, TransactionKind::Expense, food.id)
///     .date(datetime!(2025-01-15 08:30 UTC));
/// let transaction = create_transaction(transaction, user.id, &connection)?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// A short description of the transaction, must not be empty.
    pub title: String,
    /// The amount of money spent or earned.
    pub amount: Amount,
    /// Whether money was earned or spent.
    pub kind: TransactionKind,
    /// The category to file the transaction under.
    ///
    /// Must refer to a category owned by the same user.
    pub category_id: CategoryId,
    /// When the transaction happened.
    pub date: OffsetDateTime,
}

impl TransactionBuilder {
    /// Set the date of the transaction.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = date;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const SELECT_TRANSACTION: &str = "SELECT t.id, t.title, t.amount, t.kind, t.date, t.category_id, c.name
     FROM \"transaction\" t
     INNER JOIN category c ON c.id = t.category_id";

/// Create a new transaction owned by `user_id` from a builder.
///
/// The date is stored in UTC.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyTitle] if the title is empty or only whitespace,
/// - [Error::AmountOutOfRange] if the amount is larger than [Amount::MAX_WHOLE_UNITS] in either direction,
/// - [Error::InvalidCategory] if the category does not exist or belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let title = builder.title.trim();

    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }

    if !builder.amount.is_within_limit() {
        return Err(Error::AmountOutOfRange);
    }

    let category = get_category(builder.category_id, user_id, connection).map_err(|error| {
        match error {
            Error::NotFound => Error::InvalidCategory(builder.category_id),
            error => error,
        }
    })?;

    let date = builder.date.to_offset(UtcOffset::UTC);

    let id = connection
        .prepare(
            "INSERT INTO \"transaction\" (title, amount, kind, date, category_id, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
        )?
        .query_row(
            (
                title,
                builder.amount,
                builder.kind,
                date,
                category.id,
                user_id.as_i64(),
            ),
            |row| row.get(0),
        )?;

    Ok(Transaction {
        id,
        title: title.to_owned(),
        amount: builder.amount,
        kind: builder.kind,
        date,
        category_id: category.id,
        category_name: category.name,
    })
}

/// Retrieve one of a user's transactions by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} WHERE t.id = :id AND t.user_id = :user_id"
        ))?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all of a user's transactions, newest first.
///
/// Transactions on the same date are ordered by most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions(user_id: UserID, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} WHERE t.user_id = :user_id ORDER BY t.date DESC, t.id DESC"
        ))?
        .query_map(&[(":user_id", &user_id.as_i64())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// The number of rows a `DELETE` statement removed.
pub type RowsAffected = usize;

/// Delete one of a user's transactions.
///
/// Returns zero if the transaction does not exist or belongs to another user.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id AND user_id = :user_id",
            &[(":id", &id), (":user_id", &user_id.as_i64())],
        )
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// Categories cannot be deleted while a transaction refers to them.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            amount TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('Income', 'Expense')),
            date TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category_id);",
    )?;

    Ok(())
}

/// Map a row from [SELECT_TRANSACTION] to a [Transaction].
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_category_name: String = row.get(6)?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        kind: row.get(3)?,
        date: row.get(4)?,
        category_id: row.get(5)?,
        category_name: CategoryName::new_unchecked(&raw_category_name),
    })
}
