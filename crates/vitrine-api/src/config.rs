//! Server configuration.
//!
//! Loaded from a YAML file, then overridden by `VITRINE_*` environment
//! variables. Empty or whitespace-only environment values are treated as
//! unset.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use vitrine_core::{Error, Result};

/// Default resource tree location.
pub const DEFAULT_RESOURCES_DIR: &str = "./resources";

/// CORS configuration for browser-based access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins. Use `["*"]` to allow all origins (development only).
    /// Empty list disables CORS entirely.
    pub allowed_origins: Vec<String>,
}

/// Configuration for the vitrine API server.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,

    /// Public base URL of the service. Informational only.
    pub url: Option<String>,

    /// Shared secret guarding `/rebuild_data/:secret_key`.
    pub secret: String,

    /// Root of the on-disk catalog, also served under `/resources`.
    pub resources_dir: PathBuf,

    /// Enable debug mode (pretty logs instead of JSON).
    pub debug: bool,

    /// CORS configuration.
    pub cors: CorsConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("url", &self.url)
            .field("secret", &"[REDACTED]")
            .field("resources_dir", &self.resources_dir)
            .field("debug", &self.debug)
            .field("cors", &self.cors)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            url: None,
            secret: String::new(),
            resources_dir: PathBuf::from(DEFAULT_RESOURCES_DIR),
            debug: false,
            cors: CorsConfig::default(),
        }
    }
}

/// `port` may be written as a number or as a quoted string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(i64),
    Text(String),
}

impl PortValue {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    port: Option<PortValue>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    secret: Option<String>,
    #[serde(default)]
    resources_dir: Option<PathBuf>,
    #[serde(default)]
    debug: Option<bool>,
    #[serde(default)]
    cors_allowed_origins: Vec<String>,
}

/// Raw settings after merging the file with the environment, before validation.
#[derive(Debug, Default)]
struct RawConfig {
    port: Option<String>,
    url: Option<String>,
    secret: Option<String>,
    resources_dir: Option<PathBuf>,
    debug: Option<bool>,
    cors_allowed_origins: Vec<String>,
}

impl From<ConfigFile> for RawConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            port: file.port.map(PortValue::into_text),
            url: file.url,
            secret: file.secret,
            resources_dir: file.resources_dir,
            debug: file.debug,
            cors_allowed_origins: file.cors_allowed_origins,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, then applies environment overrides.
    ///
    /// Environment variables:
    /// - `VITRINE_PORT`
    /// - `VITRINE_URL`
    /// - `VITRINE_SECRET`
    /// - `VITRINE_RESOURCES_DIR`
    /// - `VITRINE_DEBUG`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed, or if
    /// the merged settings lack a valid port or a non-empty secret.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_with(&content, env_string)
    }

    /// Parses configuration from YAML text, resolving overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_yaml_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| Error::config(format!("malformed config file: {e}")))?
        };

        let mut raw = RawConfig::from(file);
        apply_overrides(&mut raw, &lookup)?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self> {
        let port = raw
            .port
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::config("port is required"))?;
        let port = port
            .parse::<u16>()
            .map_err(|e| Error::config(format!("port must be an integer in 1..=65535: {e}")))?;
        if port == 0 {
            return Err(Error::config("port must be an integer in 1..=65535"));
        }

        let secret = raw
            .secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::config("secret is required and must not be empty"))?;

        Ok(Self {
            port,
            url: raw.url.filter(|u| !u.trim().is_empty()),
            secret,
            resources_dir: raw
                .resources_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCES_DIR)),
            debug: raw.debug.unwrap_or(false),
            cors: CorsConfig {
                allowed_origins: raw.cors_allowed_origins,
            },
        })
    }
}

fn apply_overrides<F>(raw: &mut RawConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(port) = get("VITRINE_PORT") {
        raw.port = Some(port);
    }
    if let Some(url) = get("VITRINE_URL") {
        raw.url = Some(url);
    }
    if let Some(secret) = get("VITRINE_SECRET") {
        raw.secret = Some(secret);
    }
    if let Some(dir) = get("VITRINE_RESOURCES_DIR") {
        raw.resources_dir = Some(PathBuf::from(dir));
    }
    if let Some(debug) = get("VITRINE_DEBUG") {
        raw.debug = Some(parse_bool("VITRINE_DEBUG", &debug)?);
    }
    if let Some(origins) = get("VITRINE_CORS_ALLOWED_ORIGINS") {
        raw.cors_allowed_origins = parse_cors_allowed_origins(&origins);
    }
    Ok(())
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(Error::config(format!(
            "{name} must be a boolean (true/false/1/0)"
        ))),
    }
}

fn parse_cors_allowed_origins(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed == "*" {
        return vec!["*".to_string()];
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
