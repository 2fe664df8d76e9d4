//! Validated value types shared across the FitNest crates.

/// Maximum length of a user identifier in bytes.
pub const MAX_USER_ID_LEN: usize = 128;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    #[error("Text exceeds maximum length of {0} characters")]
    TooLong(usize),
    #[error("Text contains invalid characters (only alphanumeric, '.', '-', '_' allowed)")]
    InvalidCharacters,
}

/// Identifier of the user a vital-sign reading belongs to.
///
/// User identifiers end up as directory names in file-backed storage, so they are restricted to
/// a conservative ASCII set. The input is trimmed of leading and trailing whitespace during
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// Creates a new `UserId` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input, `TextError::TooLong` when the trimmed input
    /// exceeds [`MAX_USER_ID_LEN`] bytes and `TextError::InvalidCharacters` when it contains
    /// anything other than ASCII alphanumerics, `.`, `-` or `_`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }

        if trimmed.len() > MAX_USER_ID_LEN {
            return Err(TextError::TooLong(MAX_USER_ID_LEN));
        }

        let ok = trimmed
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

        // "." and ".." would escape the per-user directory.
        if !ok || trimmed.bytes().all(|b| b == b'.') {
            return Err(TextError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for UserId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for UserId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UserId::new(&s).map_err(serde::de::Error::custom)
    }
}
