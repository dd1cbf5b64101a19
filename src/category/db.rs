//! Database operations for categories.
//!
//! Every query is scoped to a user: a category that belongs to someone else
//! is treated exactly like one that does not exist.

use rusqlite::{Connection, Row};

use crate::{
    CategoryId, Error, TransactionKind, UserID,
    category::{Category, CategoryName, DEFAULT_CATEGORIES},
};

/// Create a category owned by `user_id` and return it with its generated ID.
pub fn create_category(
    name: CategoryName,
    kind: TransactionKind,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "INSERT INTO category (name, kind, user_id) VALUES (?1, ?2, ?3)
             RETURNING id, name, kind",
        )?
        .query_row((name.as_ref(), kind, user_id.as_i64()), map_row)
        .map_err(|error| error.into())
}

/// Create the [DEFAULT_CATEGORIES] for a new user.
///
/// All of the default categories are expense categories.
pub fn create_default_categories(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|name| {
            create_category(
                CategoryName::new_unchecked(name),
                TransactionKind::Expense,
                user_id,
                connection,
            )
        })
        .collect()
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the category does not exist or belongs to another user.
pub fn get_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, kind FROM category WHERE id = :id AND user_id = :user_id")?
        .query_row(
            &[(":id", &category_id), (":user_id", &user_id.as_i64())],
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all of a user's categories in the order they were created.
pub fn get_categories(user_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, kind FROM category WHERE user_id = :user_id ORDER BY id ASC")?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete a category by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the category does not exist or belongs to another user,
/// - [Error::CategoryInUse] if any transaction still refers to the category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    get_category(category_id, user_id, connection)?;

    let transaction_count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM \"transaction\" WHERE category_id = ?1",
        [category_id],
        |row| row.get(0),
    )?;

    if transaction_count > 0 {
        return Err(Error::CategoryInUse);
    }

    connection
        .execute(
            "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
            (category_id, user_id.as_i64()),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::CategoryInUse,
            error => error.into(),
        })?;

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('Income', 'Expense')),
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let kind = row.get(2)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error, Transaction, TransactionKind, UserID,
        category::{CategoryName, DEFAULT_CATEGORIES},
        create_transaction, initialize_db,
        test_utils::create_test_user,
    };

    use super::{
        create_category, create_default_categories, delete_category, get_categories,
        get_category,
    };

    fn get_test_connection() -> (Connection, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        let user = create_test_user("test@example.com", &connection);

        (connection, user.id)
    }

    #[test]
    fn create_category_succeeds() {
        let (connection, user_id) = get_test_connection();
        let name = CategoryName::new("Wages").unwrap();

        let category =
            create_category(name.clone(), TransactionKind::Income, user_id, &connection).unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.kind, TransactionKind::Income);
    }

    #[test]
    fn create_category_fails_for_missing_user() {
        let (connection, _) = get_test_connection();

        let result = create_category(
            CategoryName::new_unchecked("Wages"),
            TransactionKind::Income,
            UserID::new(999),
            &connection,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn get_category_succeeds_for_owner() {
        let (connection, user_id) = get_test_connection();
        let want = create_category(
            CategoryName::new_unchecked("Wages"),
            TransactionKind::Income,
            user_id,
            &connection,
        )
        .unwrap();

        let got = get_category(want.id, user_id, &connection).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn get_category_fails_for_other_user() {
        let (connection, user_id) = get_test_connection();
        let other_user = create_test_user("other@example.com", &connection);
        let category = create_category(
            CategoryName::new_unchecked("Wages"),
            TransactionKind::Income,
            user_id,
            &connection,
        )
        .unwrap();

        assert_eq!(
            get_category(category.id, other_user.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn get_categories_only_returns_own_categories() {
        let (connection, user_id) = get_test_connection();
        let other_user = create_test_user("other@example.com", &connection);
        let mine = create_default_categories(user_id, &connection).unwrap();
        create_default_categories(other_user.id, &connection).unwrap();

        let got = get_categories(user_id, &connection).unwrap();

        assert_eq!(got, mine);
    }

    #[test]
    fn creates_default_categories_as_expenses() {
        let (connection, user_id) = get_test_connection();

        let categories = create_default_categories(user_id, &connection).unwrap();

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_ref()).collect();
        assert_eq!(names, DEFAULT_CATEGORIES);
        assert!(
            categories
                .iter()
                .all(|category| category.kind == TransactionKind::Expense)
        );
    }

    #[test]
    fn delete_category_succeeds() {
        let (connection, user_id) = get_test_connection();
        let category = create_category(
            CategoryName::new_unchecked("Wages"),
            TransactionKind::Income,
            user_id,
            &connection,
        )
        .unwrap();

        delete_category(category.id, user_id, &connection).unwrap();

        assert_eq!(
            get_category(category.id, user_id, &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_category_fails_for_other_user() {
        let (connection, user_id) = get_test_connection();
        let other_user = create_test_user("other@example.com", &connection);
        let category = create_category(
            CategoryName::new_unchecked("Wages"),
            TransactionKind::Income,
            user_id,
            &connection,
        )
        .unwrap();

        assert_eq!(
            delete_category(category.id, other_user.id, &connection),
            Err(Error::NotFound)
        );
        assert!(get_category(category.id, user_id, &connection).is_ok());
    }

    #[test]
    fn delete_category_fails_while_in_use() {
        let (connection, user_id) = get_test_connection();
        let category = create_category(
            CategoryName::new_unchecked("Wages"),
            TransactionKind::Income,
            user_id,
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(
                "Pay day",
                "2500".parse().unwrap(),
                TransactionKind::Income,
                category.id,
            )
            .date(datetime!(2025-01-15 09:00 UTC)),
            user_id,
            &connection,
        )
        .unwrap();

        assert_eq!(
            delete_category(category.id, user_id, &connection),
            Err(Error::CategoryInUse)
        );
        assert!(get_category(category.id, user_id, &connection).is_ok());
    }
}
