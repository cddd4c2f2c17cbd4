/* src/source.rs */

use std::collections::HashMap;

/// Type alias for header maps. Keys are stored lowercase.
pub type HeaderMap = HashMap<String, String>;

/// Read-only view of an inbound request, as supplied by the HTTP layer.
///
/// Only two things are ever needed to resolve a client IP: a header lookup and
/// the transport-level peer address.
pub trait RequestSource {
    /// Look up a request header by name. Returns `None` when the header is not set.
    fn header(&self, name: &str) -> Option<&str>;

    /// The peer address of the underlying connection, without port.
    fn remote_addr(&self) -> String;
}

impl<T: RequestSource + ?Sized> RequestSource for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }

    fn remote_addr(&self) -> String {
        (**self).remote_addr()
    }
}

/// A plain owned request source, for callers without an HTTP framework.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleRequest {
    /// Request headers, keyed by lowercase name.
    pub headers: HeaderMap,
    /// Peer address of the connection.
    pub remote_addr: String,
}

impl SimpleRequest {
    /// Create a request with no headers and the given peer address.
    pub fn new(remote_addr: impl Into<String>) -> Self {
        Self {
            headers: HeaderMap::new(),
            remote_addr: remote_addr.into(),
        }
    }

    /// Add a header. The name is lowercased so lookups are case-insensitive.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }
}

impl RequestSource for SimpleRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    fn remote_addr(&self) -> String {
        self.remote_addr.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = SimpleRequest::new("127.0.0.1").with_header("X-Forwarded-For", "10.0.0.1");

        assert_eq!(request.header("x-forwarded-for"), Some("10.0.0.1"));
        assert_eq!(request.header("X-FORWARDED-FOR"), Some("10.0.0.1"));
        assert_eq!(request.header("x-real-ip"), None);
    }

    #[test]
    fn test_remote_addr() {
        fn peer<S: RequestSource>(source: S) -> String {
            source.remote_addr()
        }

        let request = SimpleRequest::new("::1");
        assert_eq!(request.remote_addr(), "::1");
        assert_eq!(peer(&request), "::1");
    }
}
