//! Route file watcher for hot reload.
//!
//! The watcher never loads anything itself; it only pulls the reload trigger.
//! Bursts of file events are coalesced by the supervisor.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::lifecycle::supervisor::ReloadTrigger;

/// A watcher that monitors the route file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    trigger: Arc<dyn ReloadTrigger>,
    poll_interval: Duration,
}

impl ConfigWatcher {
    pub fn new(path: &Path, trigger: Arc<dyn ReloadTrigger>) -> Self {
        Self {
            path: path.to_path_buf(),
            trigger,
            poll_interval: Duration::from_secs(2),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Start watching. The returned watcher must be kept alive.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// editors which replace the file by rename are still noticed.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self.path.file_name().map(|n| n.to_os_string());
        let trigger = self.trigger.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_relevant(&event, file_name.as_ref()) {
                        tracing::info!(kind = ?event.kind, "Route file change detected");
                        trigger.trigger_reload();
                    }
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Route file watcher started");
        Ok(watcher)
    }
}

fn is_relevant(event: &Event, file_name: Option<&OsString>) -> bool {
    let kind = &event.kind;
    if !(kind.is_modify() || kind.is_create() || kind.is_remove()) {
        return false;
    }
    match file_name {
        Some(name) => event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(name.as_os_str())),
        None => true,
    }
}
