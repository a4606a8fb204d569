//! # Mention Extraction and Word Search
//!
//! Text scanning over post bodies. Both operations are pure: they read post
//! text and never touch network state.
//!
//! ## Quick Reference
//!
//! | Input text          | Operation               | Result            |
//! |---------------------|-------------------------|-------------------|
//! | `"hi @bob!"`        | `mentions`              | `{bob}`           |
//! | `"@Bob hi"`         | `mentions`              | `{}` (uppercase)  |
//! | `"a@b c"`           | `mentions`              | `{b}`             |
//! | `"@@bob"`           | `mentions`              | `{bob}`           |
//! | `"this is great"`   | `contains_any(["hi"])`  | `false`           |
//! | `"HI there"`        | `contains_any(["hi"])`  | `true`            |
//!
//! ## Token Rules
//!
//! - **Mentions**: `@` followed by the longest run of `[A-Za-z0-9_]`. The run
//!   ends at the first character outside that class or at end of text, and the
//!   terminating character is not consumed, so `@a@b` yields two candidates.
//!   A candidate is kept only if it is a valid username.
//! - **Words**: matched case-insensitively as whole tokens. The characters on
//!   either side of a match must be non-alphanumeric (or text boundaries).
//!   Underscore is not alphanumeric, so `"hi"` is found in `"@hi_there"`.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{NetworkError, NetworkResult};
use crate::post::{Post, ensure_distinct};
use crate::validators::is_valid_username;

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_]*)").expect("mention pattern is valid"));

/// Usernames mentioned in a single post.
pub fn mentions(post: &Post) -> BTreeSet<String> {
    mentions_in_text(post.text())
}

/// Usernames mentioned anywhere in `posts`.
///
/// Fails with `DuplicatePost` if two posts share an id.
pub fn mentions_in(posts: &[Post]) -> NetworkResult<BTreeSet<String>> {
    ensure_distinct(posts)?;
    Ok(posts.iter().flat_map(mentions).collect())
}

pub fn mentions_in_text(text: &str) -> BTreeSet<String> {
    MENTION
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|candidate| candidate.as_str())
        .filter(|candidate| is_valid_username(candidate))
        .map(str::to_string)
        .collect()
}

/// Lowercases and de-duplicates search words.
///
/// An empty word is a missing value and fails with `InvalidInput`.
pub fn normalize_words<S: AsRef<str>>(words: &[S]) -> NetworkResult<BTreeSet<String>> {
    words
        .iter()
        .map(|word| {
            let word = word.as_ref();
            if word.is_empty() {
                Err(NetworkError::InvalidInput { what: "search word" })
            } else {
                Ok(word.to_lowercase())
            }
        })
        .collect()
}

/// Returns `true` if `text` contains at least one of the already normalized
/// `words` as a whole token.
pub fn contains_any(text: &str, words: &BTreeSet<String>) -> bool {
    let text = text.to_lowercase();
    words.iter().any(|word| contains_token(&text, word))
}

/// Every occurrence is tried, including ones overlapping an earlier
/// occurrence that failed the boundary test ("ha ha" in "aha ha ha").
fn contains_token(text: &str, word: &str) -> bool {
    let mut from = 0;
    while let Some(offset) = text[from..].find(word) {
        let start = from + offset;
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        let bounded = !before.is_some_and(char::is_alphanumeric)
            && !after.is_some_and(char::is_alphanumeric);
        if bounded {
            return true;
        }
        match text[start..].chars().next() {
            Some(first) => from = start + first.len_utf8(),
            None => return false,
        }
    }
    false
}
