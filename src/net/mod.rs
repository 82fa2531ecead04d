//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listen address ("host:port", "[v6]:port", ":port")
//!     → listener.rs (resolve, try candidates in order)
//!     → TcpListener handed to axum
//! ```
//!
//! # Design Decisions
//! - Hostnames resolve through the system resolver, like any other listener
//! - `:port` means every interface: IPv6 wildcard first, IPv4 as fallback

pub mod listener;

pub use listener::{bind, is_valid_address, resolve};
