//! User registration, log-in and bearer token authentication.

mod current_user;
mod log_in;
mod register;
mod token;

pub use current_user::get_current_user;
pub use log_in::{AuthResponse, log_in};
pub use register::register_user;
pub use token::{Claims, DEFAULT_TOKEN_DURATION, JwtKeys};

#[cfg(test)]
pub use token::{create_token, decode_token};
