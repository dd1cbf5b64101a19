//! Handles log-in requests.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    api_json::ApiJson,
    auth::token::{JwtKeys, create_token},
    user::{User, UserProfile, get_user_by_email},
};

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The keys for signing tokens.
    pub jwt_keys: JwtKeys,
    /// How long issued tokens are valid for.
    pub token_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            token_duration: state.token_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The credentials entered during log-in.
#[derive(Debug, Clone, Deserialize)]
pub struct LogInForm {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

/// The response to a successful log-in or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The bearer token to send with subsequent requests.
    pub token: String,
    /// The user the token was issued to.
    pub user: UserProfile,
}

impl AuthResponse {
    /// Issue a new token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TokenCreation] if the token could not be encoded.
    pub fn issue(user: &User, token_duration: Duration, jwt_keys: &JwtKeys) -> Result<Self, Error> {
        let token = create_token(user.id, OffsetDateTime::now_utc(), token_duration, jwt_keys)?;

        Ok(Self {
            token,
            user: user.profile(),
        })
    }
}

/// Handler for log-in requests.
///
/// # Errors
///
/// This function will return [Error::InvalidCredentials] if the email does
/// not belong to a registered user or the password is not correct, or an
/// internal error if the password could not be verified.
pub async fn log_in(
    State(state): State<LogInState>,
    ApiJson(credentials): ApiJson<LogInForm>,
) -> Result<Json<AuthResponse>, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_by_email(credentials.email.trim(), &connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?
    };

    if !user.password_hash.verify(&credentials.password)? {
        tracing::debug!("Wrong password given for user {}", user.id);
        return Err(Error::InvalidCredentials);
    }

    AuthResponse::issue(&user, state.token_duration, &state.jwt_keys).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        auth::{AuthResponse, decode_token},
        endpoints,
        test_utils::{TEST_PASSWORD, get_test_server, register_test_user},
    };

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let (server, state) = get_test_server();
        let registered = register_test_user(&server, "alice@example.com").await;

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "alice@example.com",
                "password": TEST_PASSWORD,
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<AuthResponse>();
        assert_eq!(body.user, registered.user);
        let claims = decode_token(&body.token, &state.jwt_keys).unwrap();
        assert_eq!(claims.user_id, registered.user.id);
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let (server, _) = get_test_server();
        register_test_user(&server, "alice@example.com").await;

        server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "alice@example.com",
                "password": "definitelyNotTheCorrectPassword",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let (server, _) = get_test_server();

        server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "wrongemail@gmail.com",
                "password": TEST_PASSWORD,
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let (server, _) = get_test_server();

        server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "alice@example.com" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
