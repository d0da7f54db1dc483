//! Layered server configuration: defaults, then a TOML file, then environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{McpError, McpResult, SERVER_NAME, SERVER_VERSION};

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "TOOLBOX_CONFIG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Name reported in `serverInfo` and server://info.
    pub server_name: String,
    /// `User-Agent` sent with every upstream request.
    pub user_agent: String,
    pub geocoding_url: String,
    pub weather_url: String,
    pub image_url: String,
    pub image_model: String,
    /// Environment variable the image API token is read from.
    pub image_token_env: String,
    /// Timeout of each outbound HTTP request.
    pub http_timeout_secs: u64,
    /// Upper bound on a single tool invocation.
    pub tool_timeout_secs: u64,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: SERVER_NAME.to_string(),
            user_agent: format!("{SERVER_NAME}/{SERVER_VERSION}"),
            geocoding_url: toolbox::geocode::DEFAULT_BASE_URL.to_string(),
            weather_url: toolbox::weather::DEFAULT_BASE_URL.to_string(),
            image_url: toolbox::image::DEFAULT_BASE_URL.to_string(),
            image_model: toolbox::image::DEFAULT_MODEL.to_string(),
            image_token_env: toolbox::image::DEFAULT_TOKEN_ENV.to_string(),
            http_timeout_secs: toolbox::http::DEFAULT_TIMEOUT.as_secs(),
            tool_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> McpResult<Self> {
        toml::from_str(text).map_err(|e| McpError::Config(e.to_string()))
    }

    /// Overlay `TOOLBOX_*` variables obtained through `env`.
    pub fn apply_env<F>(&mut self, env: F) -> McpResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_vars: [(&str, &mut String); 6] = [
            ("TOOLBOX_GEOCODING_URL", &mut self.geocoding_url),
            ("TOOLBOX_WEATHER_URL", &mut self.weather_url),
            ("TOOLBOX_IMAGE_URL", &mut self.image_url),
            ("TOOLBOX_IMAGE_MODEL", &mut self.image_model),
            ("TOOLBOX_IMAGE_TOKEN_ENV", &mut self.image_token_env),
            ("TOOLBOX_LOG_LEVEL", &mut self.log_level),
        ];
        for (key, slot) in string_vars {
            if let Some(value) = env(key) {
                *slot = value;
            }
        }

        let numeric_vars: [(&str, &mut u64); 2] = [
            ("TOOLBOX_HTTP_TIMEOUT_SECS", &mut self.http_timeout_secs),
            ("TOOLBOX_TOOL_TIMEOUT_SECS", &mut self.tool_timeout_secs),
        ];
        for (key, slot) in numeric_vars {
            if let Some(value) = env(key) {
                *slot = value.trim().parse().map_err(|_| {
                    McpError::Config(format!("{key} must be a whole number of seconds, got '{value}'"))
                })?;
            }
        }

        Ok(())
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> McpResult<()> {
        if self.server_name.trim().is_empty() {
            return Err(McpError::Config("server_name must not be empty".to_string()));
        }
        for (key, url) in [
            ("geocoding_url", &self.geocoding_url),
            ("weather_url", &self.weather_url),
            ("image_url", &self.image_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(McpError::Config(format!(
                    "{key} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if self.image_model.trim().is_empty() {
            return Err(McpError::Config("image_model must not be empty".to_string()));
        }
        if self.image_token_env.trim().is_empty() {
            return Err(McpError::Config("image_token_env must not be empty".to_string()));
        }
        if self.http_timeout_secs == 0 || self.tool_timeout_secs == 0 {
            return Err(McpError::Config("timeouts must be at least 1 second".to_string()));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(McpError::Config(format!(
                "log_level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        Ok(())
    }

    /// Apply a `--log-level` flag on top of the loaded layers.
    pub fn override_log_level(&mut self, level: &str) -> McpResult<()> {
        self.log_level = level.to_string();
        self.validate()
    }
}

/// Load configuration from the process environment.
///
/// `path` wins over `TOOLBOX_CONFIG`. Without either, defaults are used.
pub fn load_config(path: Option<&str>) -> McpResult<ServerConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&str>, env: F) -> McpResult<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.map(str::to_string).or_else(|| env(CONFIG_ENV));

    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(Path::new(&path))
                .map_err(|e| McpError::Config(format!("cannot read {path}: {e}")))?;
            tracing::debug!("Loaded configuration from {path}");
            ServerConfig::from_toml(&text)?
        }
        None => ServerConfig::default(),
    };

    config.apply_env(env)?;
    config.validate()?;
    Ok(config)
}
