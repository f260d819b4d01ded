//! TOML profile configuration for the `edgely` CLI.
//!
//! Profiles live in the platform config directory (on Linux,
//! `~/.config/edgely/config.toml`); values resolve flag > environment >
//! profile. Passwords are never written by the tool -- they come from
//! `EDGELY_PASSWORD` or an interactive prompt, with an opt-in
//! `password` key for lab routers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use edgely_api::{TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Named router profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One router profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Router URL, e.g. `https://192.168.1.1`.
    pub router: Option<String>,

    pub username: Option<String>,

    /// Plaintext password. Opt-in, for lab routers only; prefer
    /// `EDGELY_PASSWORD` or the interactive prompt.
    pub password: Option<String>,

    /// Verify TLS certificates when `false`. EdgeOS ships self-signed,
    /// so the default is to accept them.
    pub insecure: Option<bool>,

    pub timeout_secs: Option<u64>,
}

/// A fully resolved connection target.
pub struct ResolvedProfile {
    pub url: Url,
    pub username: String,
    pub password: Option<SecretString>,
    pub transport: TransportConfig,
}

// ── Loading & resolution ────────────────────────────────────────────

/// Platform path of the config file, if a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "edgely").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the TOML config, falling back to defaults when absent.
pub fn load_config_or_default() -> Result<Config, CliError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = config_path() {
        figment = figment.merge(Toml::file(path));
    }
    figment
        .extract()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Write the config to the platform path, creating parent directories.
/// Returns the path written.
pub fn save_config(config: &Config) -> Result<PathBuf, CliError> {
    let Some(path) = config_path() else {
        return Err(CliError::Config("no home directory found".into()));
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(config).map_err(|e| CliError::Config(e.to_string()))?;
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Resolve the active profile plus flag/env overrides into a target.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<ResolvedProfile, CliError> {
    let name = global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let profile = config.profiles.get(&name).cloned().unwrap_or_default();

    let Some(router) = global.router.clone().or(profile.router) else {
        return Err(CliError::Validation {
            field: "router".into(),
            reason: format!("no router URL configured; pass --router or add one to profile '{name}'"),
        });
    };
    let url: Url = router.parse().map_err(|_| CliError::Validation {
        field: "router".into(),
        reason: format!("invalid URL: {router}"),
    })?;

    let Some(username) = global.username.clone().or(profile.username) else {
        return Err(CliError::Validation {
            field: "username".into(),
            reason: format!("no username configured; pass --username or add one to profile '{name}'"),
        });
    };

    let password = std::env::var("EDGELY_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .map(SecretString::from)
        .or_else(|| profile.password.clone().map(SecretString::from));

    let insecure = global.insecure || profile.insecure.unwrap_or(true);
    let transport = TransportConfig {
        tls: if insecure {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        },
        timeout: Duration::from_secs(global.timeout.or(profile.timeout_secs).unwrap_or(30)),
        cookie_jar: None,
    };

    Ok(ResolvedProfile {
        url,
        username,
        password,
        transport,
    })
}
