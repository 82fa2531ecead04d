//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → resolver.rs (longest-prefix search over whole segments)
//!     → table.rs (exact lookup of each candidate)
//!     → Return: RouteMatch { source, root } or NotFound
//! ```
//!
//! # Design Decisions
//! - Tables are built by the loader and immutable once published
//! - Matching only on reconstructed segment boundaries, never raw `starts_with`
//! - Resolution is pure; any number of callers may share one table
//! - Explicit NotFound rather than a silent default route

pub mod resolver;
pub mod table;

pub use resolver::{resolve, NotFound, RouteMatch};
pub use table::{RouteTable, Source};
