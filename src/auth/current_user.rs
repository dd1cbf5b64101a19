//! Handles requests for the logged-in user's profile.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::Claims,
    user::{UserProfile, get_user_by_id},
};

/// The state needed to look up the current user.
#[derive(Debug, Clone)]
pub struct CurrentUserState {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CurrentUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the profile of the user the token was issued to.
///
/// Responds with 404 if the user no longer exists.
pub async fn get_current_user(
    State(state): State<CurrentUserState>,
    claims: Claims,
) -> Result<Json<UserProfile>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_user_by_id(claims.user_id, &connection).map(|user| Json(user.profile()))
}
