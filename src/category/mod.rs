//! Categories for grouping a user's income and expenses.

mod create;
mod db;
mod delete;
mod domain;
mod get;

pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, create_default_categories, get_categories,
    get_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryForm, CategoryName, DEFAULT_CATEGORIES};
pub use get::{get_categories_endpoint, get_category_endpoint};

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

/// The state needed by the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
