//! A path parameter extractor that reports bad parameters with the app's error type.

use axum::extract::FromRequestParts;

use crate::Error;

/// Drop-in replacement for [axum::extract::Path].
///
/// A parameter that cannot be parsed, e.g. a non-numeric ID, is rejected
/// with [Error::InvalidPath], which responds with 400 Bad Request and a JSON
/// error message.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);
