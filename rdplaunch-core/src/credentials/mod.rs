//! Credential resolution
//!
//! Turns a possibly partial [`ConnectionProfile`] into a
//! [`ResolvedConnection`] by prompting once for every field the profile does
//! not store. Fields are resolved in a fixed order: address, username,
//! password (masked), extra parameters.

use secrecy::SecretString;

use crate::menu::Prompter;
use crate::models::{ConnectionProfile, ProfileField, ResolvedConnection};
use crate::tracing::span_names;

/// Outcome of resolving a profile
#[derive(Debug)]
pub enum Resolution {
    /// Every required field is present
    Resolved(ResolvedConnection),
    /// The user left a required field empty or dismissed its prompt
    Incomplete(ProfileField),
}

/// Fills missing profile fields through a [`Prompter`]
pub struct CredentialResolver<'a> {
    prompter: &'a dyn Prompter,
}

impl<'a> CredentialResolver<'a> {
    /// Creates a resolver that asks through `prompter`
    #[must_use]
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Resolves `profile`, prompting only for unset fields
    ///
    /// Stops at the first required field left empty; later fields are not
    /// prompted for.
    #[must_use]
    pub fn resolve(&self, profile: ConnectionProfile) -> Resolution {
        let _span = tracing::info_span!(
            span_names::CREDENTIAL_RESOLVE,
            connection = %profile.name,
            free_form = profile.is_free_form()
        )
        .entered();

        let ConnectionProfile {
            name,
            address,
            username,
            password,
            params,
        } = profile;

        let Some(address) =
            address.or_else(|| self.ask(ProfileField::Address, &format!("🌐 IP address for {name}")))
        else {
            return incomplete(ProfileField::Address);
        };

        let Some(username) =
            username.or_else(|| self.ask(ProfileField::Username, &format!("👤 Username for {name}")))
        else {
            return incomplete(ProfileField::Username);
        };

        let Some(password) = password.or_else(|| {
            self.ask(
                ProfileField::Password,
                &format!("🔒 Password for {username}"),
            )
            .map(SecretString::from)
        }) else {
            return incomplete(ProfileField::Password);
        };

        let params = params.or_else(|| {
            self.ask(
                ProfileField::Params,
                &format!("⚙️ Additional params for {name}"),
            )
        })
        .filter(|p| !p.trim().is_empty());

        tracing::debug!(address = %address, has_params = params.is_some(), "Credentials resolved");

        Resolution::Resolved(ResolvedConnection {
            name,
            address,
            username,
            password,
            params,
        })
    }

    fn ask(&self, field: ProfileField, label: &str) -> Option<String> {
        match self.prompter.prompt(label, field.is_masked()) {
            Ok(answer) => answer.filter(|value| !value.trim().is_empty()),
            Err(e) => {
                tracing::warn!(field = %field, error = %e, "Prompt failed");
                None
            }
        }
    }
}

fn incomplete(field: ProfileField) -> Resolution {
    tracing::debug!(field = %field, "Required field left empty");
    Resolution::Incomplete(field)
}
