//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable carrying the California Basic-auth credential.
pub const ENV_CALI_API_AUTH: &str = "CALI_API_AUTH";
/// Environment variable carrying the Colorado Socrata app token.
pub const ENV_CO_APP_TOKEN: &str = "CO_APP_TOKEN";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value '{}' for environment variable {}", value, var)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load the relay configuration.
///
/// Reads the TOML file when a path is given (defaults otherwise), overlays the
/// process environment and validates the result.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => RelayConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values on top of file/default configuration.
///
/// Takes a lookup function so the overlay can be exercised without touching
/// the real process environment.
pub fn apply_env<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT) {
        let parsed = port.trim().parse::<u16>().map_err(|_| ConfigError::Env {
            var: ENV_PORT,
            value: port.clone(),
        })?;
        config.listener.set_port(parsed);
    }

    if let Some(auth) = lookup(ENV_CALI_API_AUTH).filter(|v| !v.is_empty()) {
        config.california.auth = Some(auth);
    }

    if let Some(token) = lookup(ENV_CO_APP_TOKEN).filter(|v| !v.is_empty()) {
        config.colorado.app_token = Some(token);
    }

    Ok(())
}
