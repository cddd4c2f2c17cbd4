/* demos/demo.rs */

use ip_util::{
    ClientIpResolver, SimpleRequest, convert_to_ipv4, get_client_ip, is_convertible_ipv6,
    is_local_ip,
};

fn main() {
    println!("=== Client IP Examples ===\n");

    // Example 1: Proxy chain in X-Forwarded-For
    example_1_forwarded_for();

    // Example 2: Fallback to the remote address
    example_2_fallback();

    // Example 3: IPv6 loopback normalization
    example_3_loopback();

    // Example 4: Custom resolver configuration
    example_4_custom_resolver();

    // Example 5: Address classification
    example_5_classification();

    println!("=== All examples completed! ===");
}

fn example_1_forwarded_for() {
    println!("Example 1: X-Forwarded-For with multiple IPs");

    let request = SimpleRequest::new("10.0.0.5")
        .with_header("X-Forwarded-For", "203.0.113.1, 192.168.1.10, 10.0.0.5");

    println!("Client IP (first in chain): {}", get_client_ip(Some(&request)));
    println!();
}

fn example_2_fallback() {
    println!("Example 2: Fallback to remote address");

    for header in [None, Some(""), Some("unknown")] {
        let mut request = SimpleRequest::new("192.0.2.123");
        if let Some(value) = header {
            request = request.with_header("X-Forwarded-For", value);
        }
        println!("  header {:?} -> {}", header, get_client_ip(Some(&request)));
    }

    println!("  no request -> {}", get_client_ip::<SimpleRequest>(None));
    println!();
}

fn example_3_loopback() {
    println!("Example 3: IPv6 loopback normalization");

    for remote in ["::1", "0:0:0:0:0:0:0:1", "::ffff:127.0.0.1"] {
        let request = SimpleRequest::new(remote);
        println!("  {} -> {}", remote, get_client_ip(Some(&request)));
    }
    println!();
}

fn example_4_custom_resolver() {
    println!("Example 4: Custom resolver configuration");

    let resolver = ClientIpResolver::new()
        .with_header("X-Real-IP")
        .with_default_ip("127.0.0.1");

    let request = SimpleRequest::new("10.0.0.5")
        .with_header("X-Forwarded-For", "203.0.113.1")
        .with_header("X-Real-IP", "198.51.100.42");

    println!("Custom resolver result: {}", resolver.resolve(Some(&request)));
    println!("Default resolver result: {}", get_client_ip(Some(&request)));
    println!();
}

fn example_5_classification() {
    println!("Example 5: Address classification");

    for ip in [
        "127.0.0.1",
        "192.168.1.1",
        "172.16.0.1",
        "172.20.0.1",
        "8.8.8.8",
        "::1",
        "::ffff:192.168.1.1",
        "2002:c0a8:0101::",
    ] {
        let ipv4 = match convert_to_ipv4(ip) {
            Ok(v4) => v4.to_string(),
            Err(err) => err.to_string(),
        };
        println!(
            "  {:<20} local={:<5} convertible={:<5} ipv4={}",
            ip,
            is_local_ip(ip),
            is_convertible_ipv6(ip),
            ipv4
        );
    }
    println!();
}
