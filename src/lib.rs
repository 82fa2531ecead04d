//! Vanity import path server.
//!
//! Maps path prefixes to VCS repositories and answers fetch-tool discovery
//! queries with a `go-import` meta tag. The route table is reloaded on SIGHUP
//! (or file change, or admin request) without disturbing in-flight requests.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::{ConfigSupervisor, Shutdown};
pub use routing::{resolve, NotFound, RouteMatch, RouteTable, Source};
