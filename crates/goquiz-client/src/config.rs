//! Configuration loading and service wiring.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use goquiz_core::runner::NotificationSettings;
use goquiz_core::traits::{Endpoints, Navigator, Services};

use crate::http::HttpTransport;
use crate::store::FileSessionStore;

/// Where the authentication and mail service lives.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    #[serde(default = "default_mail_path")]
    pub mail_path: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Sent as `Authorization: Bearer` when present.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("login_path", &self.login_path)
            .field("register_path", &self.register_path)
            .field("mail_path", &self.mail_path)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ApiConfig {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            login: self.login_path.clone(),
            register: self.register_path.clone(),
            mail: self.mail_path.clone(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            mail_path: default_mail_path(),
            timeout_secs: default_timeout(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_login_path() -> String {
    Endpoints::default().login
}
fn default_register_path() -> String {
    Endpoints::default().register
}
fn default_mail_path() -> String {
    Endpoints::default().mail
}
fn default_timeout() -> u64 {
    30
}

/// Top-level goquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoquizConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notification: NotificationSettings,
    /// Question bank JSON file.
    #[serde(default = "default_questions")]
    pub questions: PathBuf,
    /// Where the logged-in user is persisted.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

fn default_questions() -> PathBuf {
    PathBuf::from("questions.json")
}

fn default_session_file() -> PathBuf {
    dirs_path()
        .map(|d| d.join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".goquiz-session.json"))
}

impl Default for GoquizConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            notification: NotificationSettings::default(),
            questions: default_questions(),
            session_file: default_session_file(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

fn resolve_config(config: GoquizConfig) -> GoquizConfig {
    let api = config.api;
    GoquizConfig {
        api: ApiConfig {
            base_url: resolve_env_vars(&api.base_url),
            login_path: resolve_env_vars(&api.login_path),
            register_path: resolve_env_vars(&api.register_path),
            mail_path: resolve_env_vars(&api.mail_path),
            timeout_secs: api.timeout_secs,
            api_key: api
                .api_key
                .as_deref()
                .map(resolve_env_vars)
                .filter(|k| !k.is_empty()),
        },
        notification: NotificationSettings {
            enabled: config.notification.enabled,
            subject: resolve_env_vars(&config.notification.subject),
        },
        questions: resolve_path(&config.questions),
        session_file: resolve_path(&config.session_file),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `goquiz.toml` in the current directory
/// 2. `~/.config/goquiz/config.toml`
///
/// Environment variable overrides: `GOQUIZ_API_URL`, `GOQUIZ_API_KEY`.
pub fn load_config() -> Result<GoquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GoquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("goquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GoquizConfig::default(),
    };
    tracing::debug!(path = ?config_path, "loaded configuration");

    Ok(apply_env_overrides(config))
}

/// Parse a TOML config document and expand `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<GoquizConfig> {
    let config = toml::from_str::<GoquizConfig>(content)?;
    Ok(resolve_config(config))
}

fn apply_env_overrides(mut config: GoquizConfig) -> GoquizConfig {
    if let Ok(url) = std::env::var("GOQUIZ_API_URL") {
        config.api.base_url = url;
    }
    if let Ok(key) = std::env::var("GOQUIZ_API_KEY") {
        config.api.api_key = Some(key).filter(|k| !k.is_empty());
    }
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("goquiz"))
}

/// Wire the HTTP transport and the session file into [`Services`].
pub fn create_services(config: &GoquizConfig, navigator: Arc<dyn Navigator>) -> Result<Services> {
    let transport = HttpTransport::new(
        &config.api.base_url,
        config.api.api_key.clone(),
        config.api.timeout_secs,
    )?;
    Ok(Services {
        transport: Arc::new(transport),
        store: Arc::new(FileSessionStore::new(&config.session_file)),
        navigator,
        endpoints: config.api.endpoints(),
    })
}
