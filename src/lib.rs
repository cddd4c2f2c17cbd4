/* src/lib.rs */
//! # IP Util
//!
//! Resolve the client IP address of an HTTP request sitting behind reverse
//! proxies, and classify addresses as local or public.
//!
//! ## Features
//!
//! - Client IP from the first `X-Forwarded-For` entry, with fallback to the remote address
//! - `unknown` and blank header values ignored
//! - IPv6 loopback (`::1`, `0:0:0:0:0:0:0:1`) reported as `127.0.0.1`
//! - Local/private checks for loopback, `192.168.*`, `10.*` and `172.16.*`
//! - Detection and conversion of IPv4-mapped and 6to4 IPv6 addresses
//! - Optional Axum middleware and extractor integration via the `axum` feature
//!
//! ## Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use ip_util::{SimpleRequest, get_client_ip, is_local_ip};
//!
//! let request = SimpleRequest::new("::1").with_header("X-Forwarded-For", "unknown");
//!
//! let ip = get_client_ip(Some(&request));
//! assert_eq!(ip, "127.0.0.1");
//! assert!(is_local_ip(&ip));
//! ```

pub mod classifier;
pub mod error;
pub mod resolver;
pub mod source;

#[cfg(feature = "axum")]
pub mod middleware;

pub use classifier::{convert_to_ipv4, is_convertible_ipv6, is_local_ip, normalize_loopback};
pub use error::{IpUtilError, Result};
pub use resolver::{ClientIpResolver, get_client_ip, resolve_client_addr};
pub use source::{HeaderMap, RequestSource, SimpleRequest};

#[cfg(feature = "axum")]
pub use middleware::{ClientIp, ClientIpLayer, ClientIpService};
