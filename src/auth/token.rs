//! Bearer tokens: issuing them and checking them on incoming requests.

use std::fmt::Debug;

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

/// How long a token is valid for if not configured otherwise.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::minutes(60);

/// The contents of a JSON Web Token.
///
/// Adding `Claims` to a handler's arguments makes the route protected:
/// requests without a valid, unexpired bearer token are rejected with
/// [Error::InvalidToken] before the handler runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The user the token was issued to.
    pub user_id: UserID,
    /// The time the token was issued as a Unix timestamp.
    pub iat: i64,
    /// The expiry time of the token as a Unix timestamp.
    pub exp: i64,
}

/// The keys used to sign and verify tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Derive the signing and verification keys from a shared `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtKeys(********)")
    }
}

/// Create a token for `user_id` that expires `duration` after `issued_at`.
///
/// # Errors
///
/// Returns [Error::TokenCreation] if the token could not be encoded.
pub fn create_token(
    user_id: UserID,
    issued_at: OffsetDateTime,
    duration: Duration,
    jwt_keys: &JwtKeys,
) -> Result<String, Error> {
    let claims = Claims {
        user_id,
        iat: issued_at.unix_timestamp(),
        exp: (issued_at + duration).unix_timestamp(),
    };

    encode(&Header::default(), &claims, &jwt_keys.encoding)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Check the signature and expiry of `token` and return its claims.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if the token is malformed, was signed with
/// another key, or has expired.
pub fn decode_token(token: &str, jwt_keys: &JwtKeys) -> Result<Claims, Error> {
    decode::<Claims>(token, &jwt_keys.decoding, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|error| {
            tracing::debug!("Rejected token: {error}");
            Error::InvalidToken
        })
}

impl<S> FromRequestParts<S> for Claims
where
    JwtKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidToken)?;

        let jwt_keys = JwtKeys::from_ref(state);

        decode_token(bearer.token(), &jwt_keys)
    }
}
