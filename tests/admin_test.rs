//! Admin API: auth, status, listing and reload trigger.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use gogive::admin::{setup_admin_router, AdminState};
use gogive::Shutdown;

mod common;

use common::{body_string, supervisor, RoutesFixture, ROUTES};

const KEY: &str = "test-key";

fn request(method: Method, uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let body = body_string(res).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let fixture = RoutesFixture::new(ROUTES);
    let app = setup_admin_router(AdminState {
        supervisor: supervisor(&fixture),
        api_key: KEY.into(),
    });

    let (status, _) = json(&app, request(Method::GET, "/admin/status", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = json(&app, request(Method::GET, "/admin/status", Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_and_routes() {
    let fixture = RoutesFixture::new(ROUTES);
    let app = setup_admin_router(AdminState {
        supervisor: supervisor(&fixture),
        api_key: KEY.into(),
    });

    let (status, body) = json(&app, request(Method::GET, "/admin/status", Some(KEY))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generation"], 1);
    assert_eq!(body["routes"], 2);
    assert_eq!(body["last_error"], Value::Null);

    let (status, body) = json(&app, request(Method::GET, "/admin/routes", Some(KEY))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["prefix"], "/net/lldp");
    assert_eq!(body[0]["vcs"], "git");
    assert_eq!(body[1]["prefix"], "/www");
    assert_eq!(body[1]["url"], "https://example.org/www");
}

#[tokio::test]
async fn test_reload_endpoint_triggers_reload() {
    let fixture = RoutesFixture::new(ROUTES);
    let sup = supervisor(&fixture);
    let mut reports = sup.subscribe();
    let app = setup_admin_router(AdminState {
        supervisor: sup.clone(),
        api_key: KEY.into(),
    });

    let shutdown = Shutdown::new();
    tokio::spawn(sup.clone().run(shutdown.subscribe()));

    fixture.rewrite("/only git https://example.org/only.git\n");
    let (status, body) = json(&app, request(Method::POST, "/admin/reload", Some(KEY))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "queued");

    tokio::time::timeout(Duration::from_secs(5), reports.wait_for(|r| r.generation == 2))
        .await
        .expect("reload did not complete")
        .unwrap();

    let (_, body) = json(&app, request(Method::GET, "/admin/routes", Some(KEY))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["prefix"], "/only");

    shutdown.trigger();
}
