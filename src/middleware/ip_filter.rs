use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub const DENIED_PATH: &str = "/acceso-denegado";

/// Paths served without an address check.
const BYPASS_PREFIXES: &[&str] = &["/api/", "/static/"];
const BYPASS_EXACT: &[&str] = &["/api", "/static", "/favicon.ico", DENIED_PATH];

#[derive(Debug, Error, PartialEq, Eq)]
enum CidrError {
    #[error("missing prefix length")]
    MissingPrefix,
    #[error("invalid prefix length {0:?}")]
    Prefix(String),
    #[error("invalid IPv4 address {0:?}")]
    Address(String),
}

/// Allow-list of IPv4 networks checked against every page request.
#[derive(Debug, Clone)]
pub struct IpFilter {
    allowed_networks: Vec<String>,
    development_mode: bool,
}

impl IpFilter {
    pub fn new(allowed_networks: Vec<String>, development_mode: bool) -> Self {
        Self {
            allowed_networks,
            development_mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.allowed_networks.clone(), config.development_mode)
    }

    pub fn permits(&self, client_ip: &str) -> bool {
        if self.development_mode && is_local(client_ip) {
            return true;
        }
        self.allowed_networks
            .iter()
            .any(|network| ip_in_cidr(client_ip, network))
    }
}

/// Caller address: first `x-forwarded-for` hop, then the socket peer.
pub fn client_ip(req: &Request<Body>) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn is_bypassed(path: &str) -> bool {
    BYPASS_EXACT.contains(&path) || BYPASS_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Whether `ip` lies inside `cidr`. Anything unparseable is outside.
pub fn ip_in_cidr(ip: &str, cidr: &str) -> bool {
    match cidr_contains(ip, cidr) {
        Ok(inside) => inside,
        Err(e) => {
            warn!(ip, cidr, "address check failed closed: {}", e);
            false
        }
    }
}

fn cidr_contains(ip: &str, cidr: &str) -> Result<bool, CidrError> {
    let (base, prefix) = cidr.trim().split_once('/').ok_or(CidrError::MissingPrefix)?;
    let prefix: u32 = prefix
        .trim()
        .parse()
        .ok()
        .filter(|bits| *bits <= 32)
        .ok_or_else(|| CidrError::Prefix(prefix.to_string()))?;

    let caller = ipv4_to_u32(ip)?;
    let base = ipv4_to_u32(base)?;
    let mask = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - prefix)
    };

    Ok((caller & mask) == (base & mask))
}

fn ipv4_to_u32(addr: &str) -> Result<u32, CidrError> {
    addr.trim()
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| CidrError::Address(addr.to_string()))
}

fn is_local(ip: &str) -> bool {
    matches!(ip, "unknown" | "localhost")
        || ip.parse::<IpAddr>().is_ok_and(|addr| match addr {
            IpAddr::V4(v4) => v4.is_loopback(),
            IpAddr::V6(v6) => {
                v6.is_loopback() || v6.to_ipv4_mapped().is_some_and(|v4| v4.is_loopback())
            }
        })
}

pub async fn ip_filter(
    State(filter): State<Arc<IpFilter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if is_bypassed(&path) {
        return next.run(req).await;
    }

    let ip = client_ip(&req);
    if filter.permits(&ip) {
        debug!(%ip, %path, "address allowed");
        next.run(req).await
    } else {
        warn!(%ip, %path, "address outside the allow-list, redirecting");
        Redirect::temporary(DENIED_PATH).into_response()
    }
}
