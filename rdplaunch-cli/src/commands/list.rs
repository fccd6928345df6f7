//! List profiles command.

use std::fmt::Write as _;
use std::path::Path;

use rdplaunch_core::error::ConfigError;
use rdplaunch_core::models::{ConnectionProfile, ProfileField};
use rdplaunch_core::profile::ProfileStore;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::load_context;

/// List command handler
///
/// A missing profile store lists as empty.
pub fn cmd_list(config_path: Option<&Path>, format: OutputFormat) -> Result<(), CliError> {
    let (_manager, _settings, store) = load_context(config_path)?;

    let profiles = match store.load() {
        Ok(profiles) => profiles,
        Err(ConfigError::NotFound(path)) => {
            tracing::info!(path = %path.display(), "Profile store does not exist");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Table => println!("{}", format_table(&profiles)),
        OutputFormat::Json => println!("{}", format_json(&profiles)?),
    }

    Ok(())
}

/// Format profiles as a table string
#[must_use]
pub fn format_table(profiles: &[ConnectionProfile]) -> String {
    if profiles.is_empty() {
        return "No connections found.".to_string();
    }

    let mut output = String::new();

    let name_width = profiles
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let address_width = profiles
        .iter()
        .map(|p| p.address.as_deref().map_or(1, str::len))
        .max()
        .unwrap_or(7)
        .max(7);
    let user_width = profiles
        .iter()
        .map(|p| p.username.as_deref().map_or(1, str::len))
        .max()
        .unwrap_or(8)
        .max(8);

    let _ = writeln!(
        output,
        "{:<name_width$}  {:<address_width$}  {:<user_width$}  PROMPTS",
        "NAME", "ADDRESS", "USERNAME"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<address_width$}  {:-<user_width$}  {:-<7}",
        "", "", "", ""
    );

    for profile in profiles {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<address_width$}  {:<user_width$}  {}",
            profile.name,
            profile.address.as_deref().unwrap_or("-"),
            profile.username.as_deref().unwrap_or("-"),
            prompts_label(&profile.missing_fields()),
        );
    }

    output.trim_end().to_string()
}

/// Format profiles as a JSON string
///
/// # Errors
///
/// Returns `CliError::Config` if JSON serialization fails.
pub fn format_json(profiles: &[ConnectionProfile]) -> Result<String, CliError> {
    let output: Vec<ProfileOutput> = profiles.iter().map(ProfileOutput::from).collect();
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}

fn prompts_label(fields: &[ProfileField]) -> String {
    if fields.is_empty() {
        "-".to_string()
    } else {
        fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Profile summary for CLI output; the password is reported only as present
/// or absent
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfileOutput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub has_password: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    pub prompts: Vec<&'static str>,
}

impl From<&ConnectionProfile> for ProfileOutput {
    fn from(profile: &ConnectionProfile) -> Self {
        Self {
            name: profile.name.clone(),
            address: profile.address.clone(),
            username: profile.username.clone(),
            has_password: profile.has(ProfileField::Password),
            params: profile.params.clone(),
            prompts: profile
                .missing_fields()
                .into_iter()
                .map(ProfileField::as_str)
                .collect(),
        }
    }
}
