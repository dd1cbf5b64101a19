//! Summaries of a user's transactions: overall totals, a per-month breakdown
//! and spending per category.

mod aggregation;
mod endpoints;
mod transaction;

pub use aggregation::{CategorySpending, MonthlySummary, TotalsSummary};
pub use endpoints::{
    get_category_spending_endpoint, get_monthly_summary_endpoint, get_summary_endpoint,
};

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

/// The state needed by the summary endpoints.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
