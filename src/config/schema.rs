//! Server settings schema.
//!
//! These settings shape the HTTP surface around the route table: where to
//! listen, where browsers are redirected, how reloads are triggered. They are
//! read once at startup from an optional TOML file and CLI flags; unlike the
//! route file they are not reloadable.

use serde::{Deserialize, Serialize};

/// Root settings for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, timeouts).
    pub listener: ListenerConfig,

    /// Where non-`go-get` requests are sent.
    pub redirect: RedirectConfig,

    /// Reload trigger settings.
    pub reload: ReloadConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address. A bare `:port` binds all interfaces.
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: ":9625".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Documentation-site redirect for ordinary browser traffic.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RedirectConfig {
    /// Base URL; the request host and path are appended.
    pub docs_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            docs_url: "https://pkg.go.dev".to_string(),
        }
    }
}

/// Route file reload settings. SIGHUP always triggers a reload.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReloadConfig {
    /// Also reload when the route file changes on disk.
    pub watch: bool,

    /// Poll interval for the fallback watcher backend, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            watch: false,
            poll_interval_ms: 2000,
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AdminConfig {
    pub enabled: bool,

    /// Admin listener address, kept separate from public traffic.
    pub bind_address: String,

    /// Bearer token required on every admin request.
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: "127.0.0.1:9626".to_string(),
            api_key: String::new(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_format: LogFormat,

    /// Prometheus scrape address; metrics are off when unset.
    pub metrics_address: Option<String>,
}
