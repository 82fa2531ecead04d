//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load settings → Validate → supervisor.rs initial load (fatal on error)
//!     → Spawn reload loop, signal forwarders, watcher → Bind listeners
//!
//! Reload (supervisor.rs):
//!     SIGHUP / file change / admin API → trigger_reload()
//!     → reload loop loads file → swap on success, log on failure
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → broadcast → listeners drain, reload loop exits
//! ```
//!
//! # Design Decisions
//! - Ordered startup: routes first, listeners last (traffic only when ready)
//! - The route table holds no external resources, so shutdown needs no teardown

pub mod shutdown;
pub mod signals;
pub mod supervisor;

pub use shutdown::Shutdown;
pub use supervisor::{ConfigSupervisor, ReloadReport, ReloadTrigger};
