/* src/resolver.rs */

use std::net::IpAddr;

use tracing::{debug, trace};

use crate::classifier::normalize_loopback;
use crate::error::{IpUtilError, Result};
use crate::source::RequestSource;

/// Header consulted for the proxy chain.
pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Header value proxies send when they do not know the client address.
pub const UNKNOWN_VALUE: &str = "unknown";

/// Returned when there is no request to resolve from.
pub const DEFAULT_IP: &str = "0.0.0.0";

/// Configuration for client IP resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIpResolver {
    /// Forwarding header holding the proxy chain, client first.
    pub header: String,
    /// Header value that carries no address information.
    pub unknown_value: String,
    /// Result when the request source is absent.
    pub default_ip: String,
    /// Whether to rewrite IPv6 loopback to `127.0.0.1`.
    pub normalize_loopback: bool,
}

impl Default for ClientIpResolver {
    fn default() -> Self {
        Self {
            header: X_FORWARDED_FOR.to_string(),
            unknown_value: UNKNOWN_VALUE.to_string(),
            default_ip: DEFAULT_IP.to_string(),
            normalize_loopback: true,
        }
    }
}

impl ClientIpResolver {
    /// Create a resolver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the forwarding header to read.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the sentinel value that makes the header unusable.
    pub fn with_unknown_value(mut self, value: impl Into<String>) -> Self {
        self.unknown_value = value.into();
        self
    }

    /// Set the address returned for an absent request.
    pub fn with_default_ip(mut self, ip: impl Into<String>) -> Self {
        self.default_ip = ip.into();
        self
    }

    /// Set whether IPv6 loopback is rewritten to `127.0.0.1`.
    pub fn normalize_loopback(mut self, normalize: bool) -> Self {
        self.normalize_loopback = normalize;
        self
    }

    /// Resolve the client IP of `source`. Never fails.
    pub fn resolve<S: RequestSource + ?Sized>(&self, source: Option<&S>) -> String {
        let Some(source) = source else {
            trace!(default_ip = %self.default_ip, "no request source, using default ip");
            return self.default_ip.clone();
        };

        let candidate = match source.header(&self.header) {
            Some(value) if self.is_usable(value) => {
                // The original client is the leftmost entry of the chain.
                let first = value.split(',').next().unwrap_or_default().trim();
                debug!(header = %self.header, client_ip = first, "client ip taken from forwarding header");
                first.to_string()
            }
            other => {
                let remote = source.remote_addr();
                debug!(
                    header = %self.header,
                    header_value = ?other,
                    remote_addr = %remote,
                    "forwarding header unusable, using remote address"
                );
                remote
            }
        };

        if !self.normalize_loopback {
            return candidate;
        }

        let normalized = normalize_loopback(&candidate);
        if normalized != candidate {
            trace!(from = %candidate, to = normalized, "normalized ipv6 loopback");
            return normalized.to_string();
        }
        candidate
    }

    /// Resolve the client IP of `source` and parse it.
    pub fn resolve_addr<S: RequestSource + ?Sized>(&self, source: Option<&S>) -> Result<IpAddr> {
        let ip = self.resolve(source);
        ip.parse::<IpAddr>()
            .map_err(|_| IpUtilError::InvalidIpFormat(ip))
    }

    fn is_usable(&self, value: &str) -> bool {
        let value = value.trim();
        !value.is_empty() && value != self.unknown_value
    }
}

/// Resolve the client IP of a request using the default configuration.
///
/// Reads the first entry of `X-Forwarded-For`, falling back to the remote
/// address when the header is missing, blank or `unknown`. IPv6 loopback is
/// reported as `127.0.0.1`, and an absent request yields `0.0.0.0`.
///
/// # Examples
///
/// ```rust
/// use ip_util::{get_client_ip, SimpleRequest};
///
/// let request = SimpleRequest::new("127.0.0.1")
///     .with_header("X-Forwarded-For", "192.168.0.1, 10.0.0.1");
/// assert_eq!(get_client_ip(Some(&request)), "192.168.0.1");
///
/// assert_eq!(get_client_ip::<SimpleRequest>(None), "0.0.0.0");
/// ```
pub fn get_client_ip<S: RequestSource + ?Sized>(source: Option<&S>) -> String {
    ClientIpResolver::default().resolve(source)
}

/// Resolve the client IP with the default configuration and parse it into an [`IpAddr`].
pub fn resolve_client_addr<S: RequestSource + ?Sized>(source: Option<&S>) -> Result<IpAddr> {
    ClientIpResolver::default().resolve_addr(source)
}
