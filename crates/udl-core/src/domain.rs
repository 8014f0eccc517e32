//! Domain names and the built-in default list
//!
//! A [`Domain`] is a lowercase hostname with any leading `www.` removed.
//! User input goes through [`normalize`]; values read back from storage are
//! kept verbatim via [`Domain::from_stored`] so a loaded list saves unchanged.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in list used when storage holds no custom list
pub const DEFAULT_DOMAINS: [&str; 20] = [
    "nytimes.com",
    "washingtonpost.com",
    "theatlantic.com",
    "cnn.com",
    "espn.com",
    "politico.com",
    "thedailybeast.com",
    "newyorker.com",
    "buzzfeednews.com",
    "people.com",
    "huffpost.com",
    "npr.org",
    "bbc.com",
    "motherjones.com",
    "huffingtonpost.ca",
    "economist.com",
    "azfamily.com",
    "axios.com",
    "aljazeera.com",
    "vanityfair.com",
];

const WWW_PREFIX: &str = "www.";

/// A hostname entry in the domain list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    /// Wrap a value read from storage without normalizing it
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The domain as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized form used for duplicate detection
    pub fn canonical(&self) -> String {
        canonicalize(&self.0)
    }

    /// True if both refer to the same host after normalization
    pub fn same_host(&self, other: &Domain) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonicalize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    match lowered.strip_prefix(WWW_PREFIX) {
        Some(stripped) => stripped.to_string(),
        None => lowered,
    }
}

/// Normalize user input into a [`Domain`]
///
/// Trims, lowercases and strips one leading `www.`. Returns `None` when
/// nothing is left.
pub fn normalize(input: &str) -> Option<Domain> {
    let domain = canonicalize(input);
    if domain.is_empty() {
        None
    } else {
        Some(Domain(domain))
    }
}

/// The default list as owned domains, in display order
pub fn default_list() -> Vec<Domain> {
    DEFAULT_DOMAINS.iter().map(|d| Domain::from_stored(*d)).collect()
}

/// Parse a typed list position
///
/// Leading whitespace and a sign are accepted, then the leading run of
/// digits is taken and anything after it is ignored (`"3abc"` is 3). A `0x`
/// prefix switches to hexadecimal (`"0x2"` is 2). Blank input has no digits
/// and is an [`Error::InvalidIndex`]. Range checking is left to the caller;
/// negative values come back as-is.
pub fn parse_index(input: &str) -> Result<i64> {
    let text = input.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits_len = rest.chars().take_while(|c| c.is_digit(radix)).count();
    if digits_len == 0 {
        return Err(Error::invalid_index(input));
    }

    // Past i64 is still a number, just never a valid position
    let value = i64::from_str_radix(&rest[..digits_len], radix).unwrap_or(i64::MAX);
    Ok(if negative { -value } else { value })
}
