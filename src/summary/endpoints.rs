//! Route handlers for the transaction summaries.

use axum::{Json, extract::State};

use crate::{
    Error,
    auth::Claims,
    summary::{
        CategorySpending, MonthlySummary, SummaryState, TotalsSummary,
        aggregation::{category_spending, monthly_summary, totals_summary},
        transaction::{SummaryTransaction, get_summary_transactions},
    },
};

fn load_transactions(
    state: &SummaryState,
    claims: &Claims,
) -> Result<Vec<SummaryTransaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_summary_transactions(claims.user_id, &connection)
}

/// A route handler for the caller's total income, total expenses and net balance.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    claims: Claims,
) -> Result<Json<TotalsSummary>, Error> {
    let transactions = load_transactions(&state, &claims)?;

    Ok(Json(totals_summary(&transactions)))
}

/// A route handler for the caller's totals per month, newest month first.
pub async fn get_monthly_summary_endpoint(
    State(state): State<SummaryState>,
    claims: Claims,
) -> Result<Json<Vec<MonthlySummary>>, Error> {
    let transactions = load_transactions(&state, &claims)?;

    Ok(Json(monthly_summary(&transactions)))
}

/// A route handler for the caller's spending per expense category.
pub async fn get_category_spending_endpoint(
    State(state): State<SummaryState>,
    claims: Claims,
) -> Result<Json<Vec<CategorySpending>>, Error> {
    let transactions = load_transactions(&state, &claims)?;

    Ok(Json(category_spending(&transactions)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        Amount,
        category::Category,
        endpoints,
        summary::{CategorySpending, MonthlySummary, TotalsSummary},
        test_utils::{get_test_server, register_test_user},
    };

    async fn create_test_category(
        server: &TestServer,
        token: &str,
        name: &str,
        kind: &str,
    ) -> Category {
        let response = server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(token)
            .json(&json!({ "name": name, "type": kind }))
            .await;
        response.assert_status(StatusCode::CREATED);

        response.json::<Category>()
    }

    async fn create_test_transaction(
        server: &TestServer,
        token: &str,
        category: &Category,
        kind: &str,
        amount: &str,
        date: &str,
    ) {
        server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(token)
            .json(&json!({
                "title": "Test transaction",
                "amount": amount.parse::<Amount>().unwrap(),
                "type": kind,
                "categoryId": category.id,
                "date": date,
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    /// Registers a user with one income and two expenses over two months.
    async fn register_user_with_transactions(server: &TestServer, email: &str) -> String {
        let token = register_test_user(server, email).await.token;
        let salary = create_test_category(server, &token, "Salary", "Income").await;
        let food = create_test_category(server, &token, "Groceries", "Expense").await;
        let rent = create_test_category(server, &token, "Housing", "Expense").await;

        create_test_transaction(server, &token, &salary, "Income", "100", "2025-01-10T12:00:00Z")
            .await;
        create_test_transaction(server, &token, &food, "Expense", "30", "2025-01-20T12:00:00Z")
            .await;
        create_test_transaction(server, &token, &rent, "Expense", "20", "2025-02-05T12:00:00Z")
            .await;

        token
    }

    fn amount(raw: &str) -> Amount {
        raw.parse().unwrap()
    }

    #[tokio::test]
    async fn summary_returns_totals() {
        let (server, _) = get_test_server();
        let token = register_user_with_transactions(&server, "alice@example.com").await;

        let response = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<TotalsSummary>(),
            TotalsSummary::new(amount("100"), amount("50"))
        );
    }

    #[tokio::test]
    async fn summary_is_zero_for_new_user() {
        let (server, _) = get_test_server();
        let token = register_test_user(&server, "alice@example.com").await.token;

        let response = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<TotalsSummary>(),
            TotalsSummary::new(Amount::ZERO, Amount::ZERO)
        );
    }

    #[tokio::test]
    async fn monthly_summary_returns_newest_month_first() {
        let (server, _) = get_test_server();
        let token = register_user_with_transactions(&server, "alice@example.com").await;

        let response = server
            .get(endpoints::MONTHLY_SUMMARY)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<MonthlySummary>>(),
            [
                MonthlySummary {
                    month: "February 2025".to_owned(),
                    total_income: Amount::ZERO,
                    total_expenses: amount("20"),
                    net_balance: amount("-20"),
                },
                MonthlySummary {
                    month: "January 2025".to_owned(),
                    total_income: amount("100"),
                    total_expenses: amount("30"),
                    net_balance: amount("70"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn category_spending_returns_expense_categories() {
        let (server, _) = get_test_server();
        let token = register_user_with_transactions(&server, "alice@example.com").await;

        let response = server
            .get(endpoints::CATEGORY_SPENDING)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<CategorySpending>>(),
            [
                CategorySpending {
                    category_name: "Groceries".to_owned(),
                    total_spent: amount("30"),
                },
                CategorySpending {
                    category_name: "Housing".to_owned(),
                    total_spent: amount("20"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn summaries_exclude_other_users_transactions() {
        let (server, _) = get_test_server();
        register_user_with_transactions(&server, "alice@example.com").await;
        let bob = register_test_user(&server, "bob@example.com").await.token;

        let summary = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&bob)
            .await
            .json::<TotalsSummary>();
        let monthly = server
            .get(endpoints::MONTHLY_SUMMARY)
            .authorization_bearer(&bob)
            .await
            .json::<Vec<MonthlySummary>>();
        let spending = server
            .get(endpoints::CATEGORY_SPENDING)
            .authorization_bearer(&bob)
            .await
            .json::<Vec<CategorySpending>>();

        assert_eq!(summary, TotalsSummary::new(Amount::ZERO, Amount::ZERO));
        assert!(monthly.is_empty());
        assert!(spending.is_empty());
    }

    #[tokio::test]
    async fn huge_amounts_are_rejected_and_summaries_still_respond() {
        let (server, _) = get_test_server();
        let token = register_test_user(&server, "alice@example.com").await.token;
        let salary = create_test_category(&server, &token, "Salary", "Income").await;

        for _ in 0..2 {
            server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&token)
                .json(&json!({
                    "title": "Jackpot",
                    "amount": amount("70000000000000000000000000000"),
                    "type": "Income",
                    "categoryId": salary.id,
                }))
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        for endpoint in [
            endpoints::SUMMARY,
            endpoints::MONTHLY_SUMMARY,
            endpoints::CATEGORY_SPENDING,
        ] {
            server
                .get(endpoint)
                .authorization_bearer(&token)
                .await
                .assert_status_ok();
        }
    }

    #[tokio::test]
    async fn summary_amounts_are_json_numbers() {
        let (server, _) = get_test_server();
        let token = register_user_with_transactions(&server, "alice@example.com").await;

        let summary = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&token)
            .await
            .json::<Value>();
        let monthly = server
            .get(endpoints::MONTHLY_SUMMARY)
            .authorization_bearer(&token)
            .await
            .json::<Value>();

        assert!(summary["totalIncome"].is_number(), "{summary}");
        assert!(summary["netBalance"].is_number(), "{summary}");
        assert!(monthly[0]["totalExpenses"].is_number(), "{monthly}");
    }

    #[tokio::test]
    async fn summaries_require_token() {
        let (server, _) = get_test_server();

        for endpoint in [
            endpoints::SUMMARY,
            endpoints::MONTHLY_SUMMARY,
            endpoints::CATEGORY_SPENDING,
        ] {
            server
                .get(endpoint)
                .await
                .assert_status(StatusCode::UNAUTHORIZED);
        }
    }
}
