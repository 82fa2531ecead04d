//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tower::ServiceExt;

use gogive::{ConfigSupervisor, HttpServer, ServerConfig};

pub const ROUTES: &str = "\n# comment\n/net/lldp git https://example.org/net/lldp.git\n/www hg https://example.org/www\n";

/// A route file in a temp dir that lives as long as the fixture.
pub struct RoutesFixture {
    _dir: tempfile::TempDir,
    pub path: PathBuf,
}

impl RoutesFixture {
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.txt");
        fs::write(&path, body).unwrap();
        Self { _dir: dir, path }
    }

    pub fn rewrite(&self, body: &str) {
        write_routes(&self.path, body);
    }
}

/// Replace the file by rename so a concurrent reload never reads it half-written.
pub fn write_routes(path: &Path, body: &str) {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body).unwrap();
    fs::rename(&tmp, path).unwrap();
}

pub fn supervisor(fixture: &RoutesFixture) -> Arc<ConfigSupervisor> {
    Arc::new(ConfigSupervisor::start(&fixture.path).unwrap())
}

pub fn app(supervisor: Arc<ConfigSupervisor>) -> Router {
    HttpServer::new(supervisor, &ServerConfig::default()).into_router()
}

pub async fn get(app: &Router, host: &str, uri: &str) -> Response<Body> {
    let req = Request::builder()
        .uri(uri)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), 64 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
