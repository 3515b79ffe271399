mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./storyteller.toml",
        "~/.config/storyteller/config.toml",
        "/etc/storyteller/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Apply environment overrides on top of the file values.
///
/// Recognised variables: `OPENAI_API_KEY`, `OPENAI_ORG`, `OPENAI_BASE_URL`, `PORT`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = lookup("OPENAI_API_KEY") {
        config.openai.api_key = key;
    }
    if let Some(org) = lookup("OPENAI_ORG") {
        config.openai.organization = Some(org);
    }
    if let Some(url) = lookup("OPENAI_BASE_URL") {
        config.openai.base_url = url;
    }
    if let Some(port) = lookup("PORT") {
        match port.trim().parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate server config
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if let Some(ref dir) = config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    // Validate model service config
    if config.openai.max_tokens == 0 {
        anyhow::bail!("openai.max_tokens cannot be 0");
    }
    if config.openai.base_url.trim().is_empty() {
        anyhow::bail!("openai.base_url cannot be empty");
    }

    // Validate uploads
    if config.uploads.allowed_extensions.is_empty() {
        anyhow::bail!("uploads.allowed_extensions cannot be empty");
    }

    if config.story.default_complexity > 3 {
        anyhow::bail!(
            "story.default_complexity must be between 0 and 3, got {}",
            config.story.default_complexity
        );
    }

    Ok(())
}
