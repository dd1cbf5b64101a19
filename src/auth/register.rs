//! Handles requests to register a new user.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use email_address::EmailAddress;
use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error, PasswordHash, ValidatedPassword,
    api_json::ApiJson,
    auth::{log_in::AuthResponse, token::JwtKeys},
    category::create_default_categories,
    user::{NewUser, create_user},
};

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The keys for signing tokens.
    pub jwt_keys: JwtKeys,
    /// How long issued tokens are valid for.
    pub token_duration: Duration,
    /// The bcrypt cost used for new password hashes.
    pub password_hash_cost: u32,
    /// The database connection for creating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            token_duration: state.token_duration,
            password_hash_cost: state.password_hash_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The details a new user signs up with.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// The email address to log in with.
    pub email: String,
    /// The password to log in with.
    pub password: String,
    /// The user's first name.
    pub first_name: String,
}

/// A route handler for registering a new user.
///
/// On success the new user is logged in: the response is 201 Created with a
/// token and the user's profile. The user starts with the default set of
/// expense categories.
///
/// # Errors
///
/// This function will return an error if the email is invalid or already
/// registered, the first name is empty, the password is too weak, or an
/// internal error occurred.
pub async fn register_user(
    State(state): State<RegistrationState>,
    ApiJson(form): ApiJson<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    let raw_email = form.email.trim();
    let email =
        EmailAddress::from_str(raw_email).map_err(|_| Error::InvalidEmail(raw_email.to_owned()))?;

    let first_name = form.first_name.trim();
    if first_name.is_empty() {
        return Err(Error::EmptyFirstName);
    }

    let password = ValidatedPassword::new(&form.password, &[raw_email, first_name])?;
    let password_hash = PasswordHash::new(password, state.password_hash_cost)?;

    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;
        let transaction =
            SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        let user = create_user(
            NewUser {
                email,
                first_name: first_name.to_owned(),
                password_hash,
            },
            &transaction,
        )?;
        create_default_categories(user.id, &transaction)?;

        transaction.commit()?;
        user
    };

    tracing::info!("Registered new user {}", user.id);

    let response = AuthResponse::issue(&user, state.token_duration, &state.jwt_keys)?;

    Ok((StatusCode::CREATED, Json(response)))
}
