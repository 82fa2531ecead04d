//! gogive: serve vanity import paths.
//!
//! ```text
//! gogive [-a addr] [--settings FILE] [--watch] routes-file
//! ```
//!
//! The routes file holds one `prefix vcs url` record per line. Requests for
//! `/prefix/...?go-get=1` get an HTML page with
//! `<meta name="go-import" content="host/prefix vcs url">`; other requests are
//! redirected to the documentation site. Send SIGHUP to reload the routes.
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!   SIGHUP ──────▶│  signals ─┐                                   │
//!   file change ─▶│  watcher ─┼─▶ trigger_reload()                │
//!   admin API ───▶│  admin  ──┘        │                          │
//!                 │                    ▼                          │
//!                 │        supervisor reload loop                 │
//!                 │   load file → ArcSwap<RouteTable>::store      │
//!                 │                    │                          │
//!   request ─────▶│  http handler ── current() ── resolve() ─────┼──▶ import page / 303 / 404
//!                 └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use gogive::admin::{setup_admin_router, AdminState};
use gogive::config::settings::{self, load_settings};
use gogive::config::watcher::ConfigWatcher;
use gogive::config::{LogFormat, ServerConfig};
use gogive::lifecycle::{signals, ConfigSupervisor, ReloadTrigger, Shutdown};
use gogive::net;
use gogive::observability::{logging, metrics};
use gogive::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "gogive", version, about = "Serve vanity import paths")]
struct Cli {
    /// Route file: one `prefix vcs url` record per line.
    routes: PathBuf,

    /// Address to listen on (`:port` binds all interfaces).
    #[arg(short = 'a', long = "addr")]
    addr: Option<String>,

    /// Optional TOML settings file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Reload when the route file changes on disk.
    #[arg(long)]
    watch: bool,

    /// Documentation site for browser requests.
    #[arg(long)]
    docs_url: Option<String>,

    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Prometheus scrape address.
    #[arg(long)]
    metrics_address: Option<String>,

    /// Enable the admin API on this address.
    #[arg(long)]
    admin_address: Option<String>,

    /// Bearer token for the admin API.
    #[arg(long)]
    admin_key: Option<String>,
}

impl Cli {
    /// Settings file (or defaults) with command-line flags layered on top.
    fn server_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.settings {
            Some(path) => load_settings(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(addr) = &self.addr {
            config.listener.bind_address = addr.clone();
        }
        if self.watch {
            config.reload.watch = true;
        }
        if let Some(url) = &self.docs_url {
            config.redirect.docs_url = url.clone();
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        if let Some(addr) = &self.metrics_address {
            config.observability.metrics_address = Some(addr.clone());
        }
        if let Some(addr) = &self.admin_address {
            config.admin.enabled = true;
            config.admin.bind_address = addr.clone();
        }
        if let Some(key) = &self.admin_key {
            config.admin.api_key = key.clone();
        }

        settings::check(&config)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.server_config()?;

    logging::init(config.observability.log_format);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gogive starting");

    if let Some(addr) = &config.observability.metrics_address {
        metrics::init_metrics(net::resolve(addr).await?);
    }

    // Without a valid initial table there is nothing to serve.
    let supervisor = match ConfigSupervisor::start(&cli.routes) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load routes");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();

    tokio::spawn(supervisor.clone().run(shutdown.subscribe()));

    let trigger: Arc<dyn ReloadTrigger> = supervisor.clone();
    {
        let trigger = trigger.clone();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            if let Err(e) = signals::forward_reload_signals(trigger, rx).await {
                tracing::error!(error = %e, "Failed to install SIGHUP handler");
            }
        });
    }
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = signals::shutdown_on_signal(shutdown).await {
                tracing::error!(error = %e, "Failed to install shutdown handler");
            }
        });
    }

    // Dropping the watcher stops it, so keep it until main returns.
    let _watcher = if config.reload.watch {
        let watcher = ConfigWatcher::new(&cli.routes, trigger.clone())
            .with_poll_interval(Duration::from_millis(config.reload.poll_interval_ms))
            .run()
            .context("starting route file watcher")?;
        Some(watcher)
    } else {
        None
    };

    if config.admin.enabled {
        let listener = net::bind(&config.admin.bind_address).await?;
        tracing::info!(address = %listener.local_addr()?, "Admin API listening");

        let app = setup_admin_router(AdminState {
            supervisor: supervisor.clone(),
            api_key: config.admin.api_key.as_str().into(),
        });
        let stop = shutdown.signalled();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(stop).await {
                tracing::error!(error = %e, "Admin API failed");
            }
        });
    }

    let listener = net::bind(&config.listener.bind_address)
        .await
        .with_context(|| format!("binding {}", config.listener.bind_address))?;
    tracing::info!(
        address = %listener.local_addr()?,
        routes_file = %cli.routes.display(),
        "Listening"
    );

    let server = HttpServer::new(supervisor, &config);
    server.run(listener, shutdown.clone()).await?;

    // stop the reload loop and signal forwarders too
    shutdown.trigger();
    tracing::info!("Shutdown complete");
    Ok(())
}
