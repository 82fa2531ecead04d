use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::admin::AdminState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub routes_file: String,
    pub generation: u64,
    pub reload_attempts: u64,
    pub routes: usize,
    pub last_error: Option<String>,
}

#[derive(Serialize)]
pub struct RouteEntry {
    pub prefix: String,
    pub vcs: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct ReloadAccepted {
    pub status: &'static str,
}

pub async fn get_status(State(state): State<AdminState>) -> Json<SystemStatus> {
    let report = state.supervisor.report();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        routes_file: state.supervisor.path().display().to_string(),
        generation: report.generation,
        reload_attempts: report.attempts,
        routes: report.routes,
        last_error: report.last_error,
    })
}

pub async fn get_routes(State(state): State<AdminState>) -> Json<Vec<RouteEntry>> {
    let table = state.supervisor.current();
    let routes = table
        .sorted()
        .into_iter()
        .map(|(prefix, source)| RouteEntry {
            prefix: prefix.to_string(),
            vcs: source.vcs.clone(),
            url: source.url.clone(),
        })
        .collect();
    Json(routes)
}

/// Queue a reload. The outcome shows up later in `/admin/status`.
pub async fn post_reload(State(state): State<AdminState>) -> (StatusCode, Json<ReloadAccepted>) {
    tracing::info!("Reload requested via admin API");
    state.supervisor.trigger_reload();
    (StatusCode::ACCEPTED, Json(ReloadAccepted { status: "queued" }))
}
