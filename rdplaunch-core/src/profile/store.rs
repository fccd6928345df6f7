//! Profile store backed by a JSON file

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{ConnectionProfile, FREE_FORM_NAME, ProfileRecord};
use crate::tracing::span_names;

/// Source of stored connection profiles
///
/// Profiles are loaded fresh for every launch; implementations must not
/// cache between calls.
pub trait ProfileStore {
    /// Loads all profiles in store order
    ///
    /// # Errors
    /// Returns a `ConfigError` if the source is missing, unreadable,
    /// malformed, or contains duplicate or reserved names.
    fn load(&self) -> ConfigResult<Vec<ConnectionProfile>>;
}

/// Reads a JSON array of profile records
///
/// ```json
/// [
///   {"connection_name": "Office", "ip_address": "10.0.0.5", "username": "bob"}
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    /// Creates a store reading from `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses profile records from a JSON string
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed JSON and the validation
    /// errors of [`validate_profiles`].
    pub fn parse(&self, content: &str) -> ConfigResult<Vec<ConnectionProfile>> {
        let records: Vec<ProfileRecord> =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let profiles: Vec<ConnectionProfile> =
            records.into_iter().map(ConnectionProfile::from).collect();
        validate_profiles(&profiles)?;
        Ok(profiles)
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self) -> ConfigResult<Vec<ConnectionProfile>> {
        let _span =
            tracing::debug_span!(span_names::CONFIG_LOAD, path = %self.path.display()).entered();

        if !self.path.exists() {
            return Err(ConfigError::NotFound(self.path.clone()));
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::Read {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let profiles = self.parse(&content)?;
        tracing::debug!(count = profiles.len(), "Loaded connection profiles");
        Ok(profiles)
    }
}

/// Checks that stored profile names are non-empty, unique, and not reserved
///
/// # Errors
/// Returns the first violation found, in store order.
pub fn validate_profiles(profiles: &[ConnectionProfile]) -> ConfigResult<()> {
    let mut seen = HashSet::with_capacity(profiles.len());
    for (index, profile) in profiles.iter().enumerate() {
        if profile.name.is_empty() {
            return Err(ConfigError::EmptyName(index));
        }
        if profile.name == FREE_FORM_NAME {
            return Err(ConfigError::ReservedName(profile.name.clone()));
        }
        if !seen.insert(profile.name.as_str()) {
            return Err(ConfigError::DuplicateName(profile.name.clone()));
        }
    }
    Ok(())
}
