#![allow(missing_docs)]

//! Helpers shared by the tests of the route handlers.

use std::str::FromStr;

use axum::http::StatusCode;
use axum_test::TestServer;
use email_address::EmailAddress;
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, NewUser, PasswordHash, User, auth::AuthResponse, build_router, create_user,
    endpoints,
};

/// A password that passes the password strength check.
pub(crate) const TEST_PASSWORD: &str = "iamtestingwhethericancreateanewuser";

/// The lowest cost bcrypt accepts, so that tests that hash passwords run quickly.
const TEST_PASSWORD_HASH_COST: u32 = 4;

pub(crate) fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, "foobar")
        .expect("Could not create app state")
        .with_password_hash_cost(TEST_PASSWORD_HASH_COST)
}

/// Get a server running the full app router, and a handle to its state.
pub(crate) fn get_test_server() -> (TestServer, AppState) {
    let state = get_test_state();
    let app = build_router(state.clone());
    let server = TestServer::new(app);

    (server, state)
}

/// Register a user with [TEST_PASSWORD] through the API.
pub(crate) async fn register_test_user(server: &TestServer, email: &str) -> AuthResponse {
    let response = server
        .post(endpoints::REGISTER)
        .json(&json!({
            "email": email,
            "password": TEST_PASSWORD,
            "firstName": "Alice",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    response.json::<AuthResponse>()
}

/// Insert a user directly into the database, skipping password hashing.
pub(crate) fn create_test_user(email: &str, connection: &Connection) -> User {
    create_user(
        NewUser {
            email: EmailAddress::from_str(email).expect("Could not parse email"),
            first_name: "Test".to_owned(),
            password_hash: PasswordHash::new_unchecked("hunter2"),
        },
        connection,
    )
    .expect("Could not create test user")
}
