//! Configuration management subsystem.
//!
//! Two kinds of configuration live here:
//!
//! ```text
//! route file (prefix vcs url, one per line)
//!     → loader.rs (parse, reject malformed lines and duplicates)
//!     → RouteTable (immutable)
//!     → published by lifecycle::supervisor
//!
//! On reload trigger (SIGHUP, watcher.rs, admin API):
//!     supervisor re-runs loader.rs
//!     → success: atomic swap of Arc<RouteTable>
//!     → failure: logged, previous table stays live
//!
//! server settings (TOML, optional) + CLI flags
//!     → settings.rs / schema.rs
//!     → validation.rs
//!     → ServerConfig, fixed for the process lifetime
//! ```

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;
pub mod watcher;

pub use loader::{load, ConfigError, ParseErrorKind};
pub use schema::{AdminConfig, ListenerConfig, LogFormat, ServerConfig};
pub use settings::SettingsError;
