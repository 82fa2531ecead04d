//! Listen address handling.
//!
//! # Responsibilities
//! - Syntax check of listen addresses for settings validation
//! - Resolve addresses (including hostnames) to socket addresses
//! - Bind the first candidate that works

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::TcpListener;

/// Cheap syntax check: `:port`, a socket address literal, or `host:port`.
///
/// Does not resolve hostnames; that happens at bind time.
pub fn is_valid_address(addr: &str) -> bool {
    if addr.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            port.parse::<u16>().is_ok()
                && !host.contains(char::is_whitespace)
                && !host.contains(':')
        }
        None => false,
    }
}

/// All socket addresses `addr` stands for, in bind preference order.
pub async fn candidates(addr: &str) -> io::Result<Vec<SocketAddr>> {
    if let Some(port) = addr.strip_prefix(':') {
        let port: u16 = port
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        return Ok(vec![
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)),
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
        ]);
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host(addr).await?.collect();
    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} resolved to no addresses", addr),
        ));
    }
    Ok(addrs)
}

/// The preferred socket address for `addr`.
pub async fn resolve(addr: &str) -> io::Result<SocketAddr> {
    let mut addrs = candidates(addr).await?;
    Ok(addrs.remove(0))
}

/// Bind a TCP listener on the first candidate address that accepts.
pub async fn bind(addr: &str) -> io::Result<TcpListener> {
    let mut last_err = None;
    for candidate in candidates(addr).await? {
        match TcpListener::bind(candidate).await {
            Ok(listener) => {
                tracing::debug!(requested = %addr, bound = %candidate, "Listener bound");
                return Ok(listener);
            }
            Err(e) => {
                tracing::debug!(candidate = %candidate, error = %e, "Bind attempt failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, format!("cannot bind {}", addr))
    }))
}
