use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{NetworkError, NetworkResult};

/// Maximum number of characters in a username.
pub const MAX_USERNAME_LENGTH: usize = 24;
/// Maximum number of characters in a post.
pub const MAX_TEXT_LENGTH: usize = 140;

static USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]{0,23}$").expect("username pattern is valid"));

/// Returns `true` if the provided string is a syntactically valid username:
/// 1 to 24 characters of `[a-z0-9_]`, not starting with a digit.
pub fn is_valid_username(value: &str) -> bool {
    USERNAME.is_match(value)
}

/// Returns `true` if the text length is within `1..=MAX_TEXT_LENGTH` characters.
pub fn is_valid_text(value: &str) -> bool {
    let length = value.chars().count();
    length > 0 && length <= MAX_TEXT_LENGTH
}

/// Error-returning form of [`is_valid_username`]. The empty string is the
/// absent username and fails with `InvalidInput`.
pub fn check_username(value: &str) -> NetworkResult<()> {
    if value.is_empty() {
        return Err(NetworkError::InvalidInput { what: "username" });
    }
    if !is_valid_username(value) {
        return Err(NetworkError::invalid_username(value));
    }
    Ok(())
}

pub fn check_text(value: &str) -> NetworkResult<()> {
    if !is_valid_text(value) {
        return Err(NetworkError::InvalidText {
            length: value.chars().count(),
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(())
}
