//! A JSON extractor that reports malformed request bodies with the app's error type.

use axum::extract::FromRequest;

use crate::Error;

/// Drop-in replacement for [axum::Json] when extracting request bodies.
///
/// Syntax errors, missing fields, unknown enum values and a missing JSON
/// content type are all rejected with [Error::InvalidRequestBody], which
/// responds with 400 Bad Request and a JSON error message.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
