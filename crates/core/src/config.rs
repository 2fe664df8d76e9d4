//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_HISTORY_LIMIT, VITAL_SIGNS_DIR_NAME};
use crate::{VitalsError, VitalsResult};
use std::path::PathBuf;

/// Upper bound on history queries.
pub const MAX_HISTORY_LIMIT: usize = 1_000;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    history_limit: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `VitalsError::InvalidInput` if `history_limit` is zero or above
    /// [`MAX_HISTORY_LIMIT`].
    pub fn new(data_dir: PathBuf, history_limit: usize) -> VitalsResult<Self> {
        validate_history_limit(history_limit)?;

        Ok(Self {
            data_dir,
            history_limit,
        })
    }

    pub fn vital_signs_dir(&self) -> PathBuf {
        self.data_dir.join(VITAL_SIGNS_DIR_NAME)
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

pub fn validate_history_limit(limit: usize) -> VitalsResult<()> {
    if limit == 0 || limit > MAX_HISTORY_LIMIT {
        return Err(VitalsError::InvalidInput(format!(
            "history limit must be between 1 and {MAX_HISTORY_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

/// Resolve the data directory from an optional override.
///
/// Empty or whitespace-only overrides fall back to [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Parse the history limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_HISTORY_LIMIT`].
pub fn history_limit_from_env_value(value: Option<String>) -> VitalsResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let parsed = value
        .map(|v| {
            v.parse::<usize>().map_err(|e| {
                VitalsError::InvalidInput(format!("invalid history limit {v:?}: {e}"))
            })
        })
        .transpose()?;

    let limit = parsed.unwrap_or(DEFAULT_HISTORY_LIMIT);
    validate_history_limit(limit)?;
    Ok(limit)
}
