//! Ownership and hot-swap of the published route table.
//!
//! # States
//! ```text
//! Initializing → Serving: initial load succeeded
//! Initializing → (exit): initial load failed, the process does not start
//! Serving → Serving: reload succeeded, new table swapped in
//! Serving → Serving: reload failed, previous table kept and error logged
//! ```
//!
//! Readers call [`ConfigSupervisor::current`], which is a single atomic load
//! of an `Arc<RouteTable>`. It never waits on a reload. A reload parses into a
//! private table and publishes it with one atomic store, so a reader sees
//! either the old generation or the new one, never a mix. Readers that already
//! hold the old `Arc` keep using it until they drop it.
//!
//! Reload triggers are coalesced: any number of triggers while a reload is
//! pending or running result in at most one follow-up reload.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use serde::Serialize;
use tokio::sync::{broadcast, watch, Notify};

use crate::config::loader::{self, ConfigError};
use crate::observability::metrics;
use crate::routing::table::RouteTable;

/// Something that can be asked to reload the route table.
///
/// Signal handlers, the file watcher and the admin API only ever see this.
pub trait ReloadTrigger: Send + Sync {
    fn trigger_reload(&self);
}

/// Outcome of the most recent load, published after every attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReloadReport {
    /// Reload attempts finished since startup (the initial load is not counted).
    pub attempts: u64,
    /// Number of tables published so far; the initial table is generation 1.
    pub generation: u64,
    /// Route count of the published table.
    pub routes: usize,
    /// Error from the latest attempt, cleared by the next success.
    pub last_error: Option<String>,
}

/// Owns the live [`RouteTable`] and serializes its replacement.
pub struct ConfigSupervisor {
    path: PathBuf,
    current: ArcSwap<RouteTable>,
    /// Holds at most one permit, which is what coalesces triggers.
    pending: Notify,
    /// Serializes writers only; readers never touch it.
    reload_lock: Mutex<()>,
    report: watch::Sender<ReloadReport>,
}

impl ConfigSupervisor {
    /// Perform the initial load. Failure here is fatal to the caller.
    pub fn start(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let table = loader::load(&path)?;
        let routes = table.len();

        tracing::info!(path = %path.display(), routes, "Initial route table loaded");
        metrics::set_routes(routes);

        let (report, _) = watch::channel(ReloadReport {
            attempts: 0,
            generation: 1,
            routes,
            last_error: None,
        });

        Ok(Self {
            path,
            current: ArcSwap::from_pointee(table),
            pending: Notify::new(),
            reload_lock: Mutex::new(()),
            report,
        })
    }

    /// The route file this supervisor loads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The currently published table.
    pub fn current(&self) -> Arc<RouteTable> {
        self.current.load_full()
    }

    /// Request an asynchronous reload, handled by [`ConfigSupervisor::run`].
    pub fn trigger_reload(&self) {
        self.pending.notify_one();
    }

    /// Latest reload outcome.
    pub fn report(&self) -> ReloadReport {
        self.report.borrow().clone()
    }

    /// Watch reload outcomes as they happen.
    pub fn subscribe(&self) -> watch::Receiver<ReloadReport> {
        self.report.subscribe()
    }

    /// Load the route file and, on success, publish it.
    ///
    /// Blocks on file I/O. On failure the published table is left untouched.
    pub fn reload_now(&self) -> Result<Arc<RouteTable>, ConfigError> {
        let _writer = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);

        match loader::load(&self.path) {
            Ok(table) => {
                let table = Arc::new(table);
                let routes = table.len();
                self.current.store(table.clone());

                self.report.send_modify(|r| {
                    r.attempts += 1;
                    r.generation += 1;
                    r.routes = routes;
                    r.last_error = None;
                });
                metrics::record_reload(true);
                metrics::set_routes(routes);

                tracing::info!(
                    path = %self.path.display(),
                    routes,
                    generation = self.report.borrow().generation,
                    "Route table reloaded"
                );
                Ok(table)
            }
            Err(e) => {
                self.report.send_modify(|r| {
                    r.attempts += 1;
                    r.last_error = Some(e.to_string());
                });
                metrics::record_reload(false);

                tracing::error!(
                    error = %e,
                    generation = self.report.borrow().generation,
                    "Failed to reload routes. Keeping current table."
                );
                Err(e)
            }
        }
    }

    /// Maintenance loop: wait for triggers and reload until shutdown.
    pub async fn run(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        tracing::debug!(path = %self.path.display(), "Reload loop started");

        loop {
            tokio::select! {
                _ = self.pending.notified() => {
                    let this = self.clone();
                    // errors are logged and reported inside reload_now
                    if let Err(e) = tokio::task::spawn_blocking(move || this.reload_now()).await {
                        tracing::error!(error = %e, "Reload task panicked");
                    }
                }
                _ = shutdown.recv() => break,
            }
        }

        tracing::debug!("Reload loop stopped");
    }
}

impl ReloadTrigger for ConfigSupervisor {
    fn trigger_reload(&self) {
        ConfigSupervisor::trigger_reload(self);
    }
}
