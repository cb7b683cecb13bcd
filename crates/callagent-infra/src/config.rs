//! Settings loader for the AI Calling Agent API.
//!
//! Sources, lowest precedence first:
//! 1. [`Settings::default()`]
//! 2. a TOML file (`--config` / `CALLAGENT_CONFIG`, else `./callagent.toml`)
//! 3. `CALLAGENT_*` environment variables
//!
//! 4. CLI flags, via [`apply_cli_overrides`]
//!
//! Unlike optional runtime
//! tuning, a broken configuration here is fatal: the caller gets a
//! [`ConfigError`] and must not start the server.

use std::path::Path;

use callagent_types::config::{OriginPolicy, Settings};
use callagent_types::error::ConfigError;

/// Config file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "callagent.toml";

pub const ENV_HOST: &str = "CALLAGENT_HOST";
pub const ENV_PORT: &str = "CALLAGENT_PORT";
pub const ENV_ALLOWED_ORIGINS: &str = "CALLAGENT_ALLOWED_ORIGINS";
pub const ENV_ALLOW_CREDENTIALS: &str = "CALLAGENT_ALLOW_CREDENTIALS";

/// Load settings from the file and the process environment.
pub async fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = load_settings_file(explicit).await?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

/// Load the TOML layer.
///
/// - `Some(path)`: the file must exist and parse.
/// - `None`: `./callagent.toml` is used if present, otherwise defaults.
pub async fn load_settings_file(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    match explicit {
        Some(path) => read_settings(path, true).await,
        None => read_settings(Path::new(DEFAULT_CONFIG_FILE), false).await,
    }
}

/// Read and parse one TOML file. A missing file yields defaults unless
/// `required` is set.
pub async fn read_settings(path: &Path, required: bool) -> Result<Settings, ConfigError> {
    let path = path.to_path_buf();
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if required {
                return Err(ConfigError::NotFound(path));
            }
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let settings = toml::from_str::<Settings>(&content).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        message: err.message().to_string(),
    })?;

    tracing::info!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

/// Apply `CALLAGENT_*` overrides using `lookup` to read variables.
///
/// `lookup` is injected so tests do not have to mutate the process
/// environment.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_HOST) {
        let host = host.trim();
        if host.is_empty() {
            return Err(invalid_env(ENV_HOST, host, "host must not be empty"));
        }
        settings.server.host = host.to_string();
    }

    if let Some(port) = lookup(ENV_PORT) {
        settings.server.port = port
            .trim()
            .parse()
            .map_err(|_| invalid_env(ENV_PORT, &port, "expected a port number (0-65535)"))?;
    }

    if let Some(origins) = lookup(ENV_ALLOWED_ORIGINS) {
        let list: Vec<String> = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        settings.cors.allowed_origins = OriginPolicy::try_from(list)?;
    }

    if let Some(flag) = lookup(ENV_ALLOW_CREDENTIALS) {
        settings.cors.allow_credentials = parse_bool(&flag)
            .ok_or_else(|| invalid_env(ENV_ALLOW_CREDENTIALS, &flag, "expected true or false"))?;
    }

    Ok(())
}

/// Apply `serve --host/--port`; flags win over every other source.
pub fn apply_cli_overrides(settings: &mut Settings, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid_env(var: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
