//! Connection profile model

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Display name of the free-form sentinel profile
pub const FREE_FORM_NAME: &str = "Connect to...";

/// A field of a connection profile that may need interactive resolution
///
/// Variants are declared in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    /// Network address (hostname or IP)
    Address,
    /// Login name
    Username,
    /// Login password
    Password,
    /// Extra client parameters
    Params,
}

impl ProfileField {
    /// All fields, in the order they are resolved
    pub const ALL: [Self; 4] = [Self::Address, Self::Username, Self::Password, Self::Params];

    /// Returns true if the launch cannot proceed without this field
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Params)
    }

    /// Returns true if user input for this field must be masked
    #[must_use]
    pub const fn is_masked(self) -> bool {
        matches!(self, Self::Password)
    }

    /// Returns the lowercase identifier of the field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Username => "username",
            Self::Password => "password",
            Self::Params => "params",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, possibly partial set of connection fields
///
/// Absent fields are resolved interactively at launch time. An empty
/// address, username, or password counts as absent. Stored params are kept
/// even when empty: an empty string means "no extra parameters" and is not
/// prompted for.
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    /// Unique display name
    pub name: String,
    /// Network address
    pub address: Option<String>,
    /// Login name
    pub username: Option<String>,
    /// Login password
    pub password: Option<SecretString>,
    /// Extra parameters passed verbatim to the client
    pub params: Option<String>,
}

impl ConnectionProfile {
    /// Creates a profile with only a name set
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            username: None,
            password: None,
            params: None,
        }
    }

    /// Returns the free-form sentinel profile
    #[must_use]
    pub fn free_form() -> Self {
        Self::new(FREE_FORM_NAME)
    }

    /// Returns true if this is the free-form sentinel
    #[must_use]
    pub fn is_free_form(&self) -> bool {
        self.name == FREE_FORM_NAME
    }

    /// Sets the address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = non_empty(address.into());
        self
    }

    /// Sets the username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = non_empty(username.into());
        self
    }

    /// Sets the password, verbatim
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = stored_password(password.into());
        self
    }

    /// Sets the extra parameters; an empty string stores "none"
    #[must_use]
    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Returns true if the given field has a stored value
    #[must_use]
    pub fn has(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::Address => self.address.is_some(),
            ProfileField::Username => self.username.is_some(),
            ProfileField::Password => self
                .password
                .as_ref()
                .is_some_and(|p| !p.expose_secret().is_empty()),
            ProfileField::Params => self.params.is_some(),
        }
    }

    /// Returns the fields that will be prompted for, in resolution order
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| !self.has(*field))
            .collect()
    }
}

/// On-disk representation of a profile
///
/// Field names follow the legacy `rdp_connector.json` layout; the shorter
/// names are accepted as aliases.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileRecord {
    #[serde(rename = "connection_name", alias = "name")]
    name: String,
    #[serde(default, rename = "ip_address", alias = "address")]
    address: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, alias = "extra_params")]
    params: Option<String>,
}

impl From<ProfileRecord> for ConnectionProfile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            name: record.name.trim().to_string(),
            address: record.address.and_then(non_empty),
            username: record.username.and_then(non_empty),
            password: record.password.and_then(stored_password),
            params: record.params,
        }
    }
}

/// A profile with every required field present
///
/// Built by the credential resolver. The password stays wrapped until the
/// launcher hands it to the client process.
#[derive(Debug, Clone)]
pub struct ResolvedConnection {
    /// Display name of the profile this was resolved from
    pub name: String,
    /// Network address
    pub address: String,
    /// Login name
    pub username: String,
    /// Login password
    pub password: SecretString,
    /// Extra parameters, `None` when the user supplied none
    pub params: Option<String>,
}

impl ResolvedConnection {
    /// Returns the extra parameters split into client arguments
    ///
    /// Splitting is plain whitespace splitting without quote handling. Empty
    /// or blank parameters yield no arguments.
    #[must_use]
    pub fn param_args(&self) -> Vec<String> {
        self.params
            .as_deref()
            .map(|p| p.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Passwords are never trimmed; only the empty string counts as unset
fn stored_password(value: String) -> Option<SecretString> {
    (!value.is_empty()).then(|| SecretString::from(value))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
