/* demos/axum.rs */

use axum::{Router, extract::ConnectInfo, response::Json, routing::get};
use ip_util::{ClientIp, ClientIpLayer, ClientIpResolver, is_convertible_ipv6};
use serde_json::json;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = create_app();
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    println!("Server starting on http://localhost:3000");
    println!("Test endpoints:");
    println!("  • GET /ip            - JSON response with client IP details");
    println!("  • GET /real-ip       - Same, resolved from X-Real-IP instead");
    println!("  • GET /debug         - Connection info next to the resolved IP");
    println!();
    println!("Test with headers:");
    println!("  curl -H 'X-Forwarded-For: 198.51.100.1, 192.168.1.1' http://localhost:3000/ip");
    println!("  curl -H 'X-Forwarded-For: unknown' http://localhost:3000/ip");
    println!("  curl -H 'X-Real-IP: 192.0.2.100' http://localhost:3000/real-ip");
    println!();

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

fn create_app() -> Router {
    let default_router = Router::new()
        .route("/ip", get(ip_handler))
        .layer(ClientIpLayer::default());

    let real_ip_router = Router::new()
        .route("/", get(ip_handler))
        .layer(ClientIpLayer::with_resolver(
            ClientIpResolver::new().with_header("X-Real-IP"),
        ));

    default_router
        .nest("/real-ip", real_ip_router)
        .route("/debug", get(debug_handler))
}

/// Handler that returns IP information in JSON format
async fn ip_handler(client_ip: ClientIp) -> Json<serde_json::Value> {
    Json(json!({
        "client_ip": client_ip.ip(),
        "is_local": client_ip.is_local(),
        "is_convertible_ipv6": is_convertible_ipv6(client_ip.ip()),
        "parsed": client_ip.to_addr().map(|ip| ip.to_string()).ok(),
    }))
}

/// Debug handler; runs without the layer so the extractor resolves on its own
async fn debug_handler(
    client_ip: ClientIp,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: axum::http::HeaderMap,
) -> Json<serde_json::Value> {
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok());

    Json(json!({
        "client_ip": client_ip.ip(),
        "connection_info": {
            "remote_addr": addr.to_string(),
            "remote_ip": addr.ip().to_string(),
            "remote_port": addr.port(),
        },
        "x_forwarded_for": forwarded_for,
        "ip_source": if client_ip.ip() == addr.ip().to_string() {
            "connection"
        } else {
            "header_or_normalized"
        },
    }))
}
