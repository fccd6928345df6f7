//! Choosing the profile to launch

use crate::error::ConfigResult;
use crate::menu::Picker;
use crate::models::{ConnectionProfile, FREE_FORM_NAME};
use crate::tracing::span_names;

use super::store::validate_profiles;

/// Label shown above the connection list
pub const SELECT_PROMPT: &str = "Select connection:";

/// Presents stored profiles plus the free-form entry and returns the choice
pub struct ConnectionSelector<'a> {
    picker: &'a dyn Picker,
}

impl<'a> ConnectionSelector<'a> {
    /// Creates a selector that asks through `picker`
    #[must_use]
    pub fn new(picker: &'a dyn Picker) -> Self {
        Self { picker }
    }

    /// Lets the user choose a profile
    ///
    /// Returns `Ok(None)` when the picker is dismissed, fails to run, or
    /// returns a name that matches no profile.
    ///
    /// # Errors
    /// Returns a `ConfigError` if profile names are empty, duplicated, or
    /// collide with the free-form name. Validation happens before the
    /// picker is shown.
    pub fn select(
        &self,
        profiles: &[ConnectionProfile],
    ) -> ConfigResult<Option<ConnectionProfile>> {
        validate_profiles(profiles)?;

        let _span =
            tracing::info_span!(span_names::CONNECTION_SELECT, count = profiles.len()).entered();
        let candidates = candidate_names(profiles);

        let choice = match self.picker.pick(SELECT_PROMPT, &candidates) {
            Ok(Some(choice)) => choice,
            Ok(None) => {
                tracing::debug!("Connection selection cancelled");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Connection picker failed");
                return Ok(None);
            }
        };

        let selected = find_profile(profiles, &choice);
        if selected.is_none() {
            tracing::debug!(choice = %choice, "Picker returned an unknown connection");
        }
        Ok(selected)
    }
}

/// Returns the menu entries: stored names sorted case-insensitively,
/// followed by the free-form entry
#[must_use]
pub fn candidate_names(profiles: &[ConnectionProfile]) -> Vec<String> {
    let mut names: Vec<String> = profiles.iter().map(|p| p.name.clone()).collect();
    names.sort_by_key(|name| name.to_lowercase());
    names.push(FREE_FORM_NAME.to_string());
    names
}

/// Looks a profile up by exact display name
///
/// The free-form name resolves to the free-form sentinel.
#[must_use]
pub fn find_profile(profiles: &[ConnectionProfile], name: &str) -> Option<ConnectionProfile> {
    if name == FREE_FORM_NAME {
        return Some(ConnectionProfile::free_form());
    }
    profiles.iter().find(|p| p.name == name).cloned()
}
