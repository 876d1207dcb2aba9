use crate::client_config::{
    ClientConfig, Credentials, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or only one half of the
/// credential pair is set.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_client_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_client_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or only one half of the
/// credential pair is set.
pub fn load_client_config_from_env() -> Result<ClientConfig, ConfigError> {
    build_client_config(|key| std::env::var(key))
}

/// Build client configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_client_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let api_url = or_default("KBG_API_URL", DEFAULT_API_URL);
    if api_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "KBG_API_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let user_agent = or_default("KBG_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_u64("KBG_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    let connect_timeout_secs = parse_u64("KBG_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;

    let credentials = match (lookup("KBG_EMAIL").ok(), lookup("KBG_PASSWORD").ok()) {
        (Some(email), Some(password)) => Some(Credentials { email, password }),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("KBG_PASSWORD".to_string())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("KBG_EMAIL".to_string())),
    };

    Ok(ClientConfig {
        api_url,
        user_agent,
        request_timeout_secs,
        connect_timeout_secs,
        credentials,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
