//! Transaction aggregation for the summary endpoints.
//!
//! All sums are exact decimal sums. The net balance is always derived from
//! the income and expense totals when a summary is built.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use time::{Month, UtcOffset};

use crate::{Amount, TransactionKind, summary::transaction::SummaryTransaction};

/// The total income, total expenses and net balance over a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSummary {
    total_income: Amount,
    total_expenses: Amount,
    net_balance: Amount,
}

impl TotalsSummary {
    /// Create a summary from the income and expense totals.
    pub fn new(total_income: Amount, total_expenses: Amount) -> Self {
        Self {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
        }
    }

    /// The sum of all income.
    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    /// The sum of all expenses.
    pub fn total_expenses(&self) -> Amount {
        self.total_expenses
    }

    /// Total income minus total expenses.
    pub fn net_balance(&self) -> Amount {
        self.net_balance
    }
}

/// The totals for a single calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// The month and year, e.g. "June 2025".
    pub month: String,
    /// The sum of income in the month.
    pub total_income: Amount,
    /// The sum of expenses in the month.
    pub total_expenses: Amount,
    /// Income minus expenses for the month.
    pub net_balance: Amount,
}

/// The total spent in a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    /// The name of the category.
    pub category_name: String,
    /// The sum of the expenses in the category.
    pub total_spent: Amount,
}

/// Sums income and expenses independently.
///
/// An empty slice yields zero for every total.
pub(super) fn totals_summary(transactions: &[SummaryTransaction]) -> TotalsSummary {
    let (total_income, total_expenses) = sum_by_kind(transactions.iter());

    TotalsSummary::new(total_income, total_expenses)
}

/// Groups transactions by calendar month (UTC) and sums each group.
///
/// # Returns
/// One entry per month that has at least one transaction, newest month first.
pub(super) fn monthly_summary(transactions: &[SummaryTransaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u8), Vec<&SummaryTransaction>> = BTreeMap::new();

    for transaction in transactions {
        let date = transaction.date.to_offset(UtcOffset::UTC);
        let key = (date.year(), u8::from(date.month()));
        months.entry(key).or_default().push(transaction);
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), month_transactions)| {
            let (total_income, total_expenses) = sum_by_kind(month_transactions.into_iter());

            MonthlySummary {
                month: format_month_label(year, month),
                total_income,
                total_expenses,
                net_balance: total_income - total_expenses,
            }
        })
        .collect()
}

/// Sums expenses per category name.
///
/// Income and transactions without a category are ignored.
///
/// # Returns
/// One entry per category, largest total first with ties in name order.
pub(super) fn category_spending(transactions: &[SummaryTransaction]) -> Vec<CategorySpending> {
    let mut totals: HashMap<&str, Amount> = HashMap::new();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }

        if let Some(category_name) = &transaction.category_name {
            *totals.entry(category_name.as_str()).or_default() += transaction.amount;
        }
    }

    let mut spending: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category_name, total_spent)| CategorySpending {
            category_name: category_name.to_owned(),
            total_spent,
        })
        .collect();

    spending.sort_by(|a, b| {
        b.total_spent
            .cmp(&a.total_spent)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });

    spending
}

fn sum_by_kind<'a>(transactions: impl Iterator<Item = &'a SummaryTransaction>) -> (Amount, Amount) {
    let mut income = Amount::ZERO;
    let mut expenses = Amount::ZERO;

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => income += transaction.amount,
            TransactionKind::Expense => expenses += transaction.amount,
        }
    }

    (income, expenses)
}

fn format_month_label(year: i32, month: u8) -> String {
    match Month::try_from(month) {
        Ok(month) => format!("{month} {year}"),
        Err(_) => format!("{month:02}/{year}"),
    }
}
