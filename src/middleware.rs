/* src/middleware.rs */

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request},
    http::{Extensions, request::Parts},
    response::Response,
};
use futures_util::future::BoxFuture;
use std::{
    convert::Infallible,
    net::{IpAddr, SocketAddr},
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::debug;

use crate::classifier::is_local_ip;
use crate::error::IpUtilError;
use crate::resolver::{ClientIpResolver, DEFAULT_IP};
use crate::source::RequestSource;

impl<B> RequestSource for axum::http::Request<B> {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }

    fn remote_addr(&self) -> String {
        connect_ip(self.extensions())
    }
}

impl RequestSource for Parts {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    fn remote_addr(&self) -> String {
        connect_ip(&self.extensions)
    }
}

/// Peer IP from `ConnectInfo`, or `0.0.0.0` if the server was not started with connect info.
fn connect_ip(extensions: &Extensions) -> String {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|connect_info| connect_info.0.ip().to_string())
        .unwrap_or_else(|| DEFAULT_IP.to_string())
}

/// Extension that holds the resolved client IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    /// Get the IP address text.
    pub fn ip(&self) -> &str {
        &self.0
    }

    /// Whether the address is loopback or in one of the recognized private blocks.
    pub fn is_local(&self) -> bool {
        is_local_ip(&self.0)
    }

    /// Parse the address.
    pub fn to_addr(&self) -> crate::Result<IpAddr> {
        self.0
            .parse()
            .map_err(|_| IpUtilError::InvalidIpFormat(self.0.clone()))
    }
}

/// Layer that resolves the client IP of every request.
///
/// The result is stored as a [`ClientIp`] request extension that handlers can
/// extract.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use ip_util::{ClientIp, ClientIpLayer};
///
/// async fn handler(ip: ClientIp) -> String {
///     ip.0
/// }
///
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .layer(ClientIpLayer::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientIpLayer {
    resolver: ClientIpResolver,
}

impl ClientIpLayer {
    /// Create a layer with the default resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer with a custom resolver configuration.
    pub fn with_resolver(resolver: ClientIpResolver) -> Self {
        Self { resolver }
    }
}

impl<S> Layer<S> for ClientIpLayer {
    type Service = ClientIpService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClientIpService {
            inner,
            resolver: self.resolver.clone(),
        }
    }
}

/// Service that resolves client IP addresses.
#[derive(Debug, Clone)]
pub struct ClientIpService<S> {
    inner: S,
    resolver: ClientIpResolver,
}

impl<S> Service<Request> for ClientIpService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let client_ip = self.resolver.resolve(Some(&req));
        debug!(client_ip = %client_ip, uri = %req.uri(), "resolved client ip");
        req.extensions_mut().insert(ClientIp(client_ip));

        let future = self.inner.call(req);
        Box::pin(async move { future.await })
    }
}

/// Axum extractor for the client IP.
///
/// Uses the value published by [`ClientIpLayer`] when present and otherwise
/// resolves it from the request with the default configuration.
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(client_ip) = parts.extensions.get::<ClientIp>() {
            return Ok(client_ip.clone());
        }
        Ok(ClientIp(ClientIpResolver::default().resolve(Some(&*parts))))
    }
}
