// Command handlers for the edgely CLI.

pub mod config_cmd;
pub mod system;

use tracing::debug;

use crate::cli::{GlobalOpts, ProfileCmd};
use crate::config;
use crate::error::CliError;

/// Handle `edgely profile ...` -- purely local, no router connection.
pub fn profile(cmd: ProfileCmd, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        ProfileCmd::List => {
            let config = config::load_config_or_default()?;
            if config.profiles.is_empty() {
                println!("no profiles configured");
                return Ok(());
            }
            let default = config.default_profile.as_deref().unwrap_or("default");
            let mut names: Vec<_> = config.profiles.keys().collect();
            names.sort();
            for name in names {
                let marker = if name == default { "*" } else { " " };
                println!("{marker} {name}");
            }
            Ok(())
        }
        ProfileCmd::Set { name, default } => {
            let mut config = config::load_config_or_default()?;
            let profile = config.profiles.entry(name.clone()).or_default();
            if let Some(router) = &global.router {
                profile.router = Some(router.clone());
            }
            if let Some(username) = &global.username {
                profile.username = Some(username.clone());
            }
            if global.insecure {
                profile.insecure = Some(true);
            }
            if let Some(timeout) = global.timeout {
                profile.timeout_secs = Some(timeout);
            }
            if default || config.default_profile.is_none() {
                config.default_profile = Some(name.clone());
            }
            let path = config::save_config(&config)?;
            debug!("wrote profile '{name}' to {}", path.display());
            println!("profile '{name}' saved");
            Ok(())
        }
        ProfileCmd::Path => {
            match config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("no home directory found"),
            }
            Ok(())
        }
    }
}
