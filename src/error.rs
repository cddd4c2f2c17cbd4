/* src/error.rs */

use thiserror::Error;

/// Result type alias for the strict operations that may fail with `IpUtilError`.
pub type Result<T> = std::result::Result<T, IpUtilError>;

/// Errors returned by the strict companions of the resolver and classifier.
///
/// The core operations (`get_client_ip`, `is_local_ip`, `is_convertible_ipv6`)
/// never fail; only typed conversions report errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IpUtilError {
    /// The address text could not be parsed as an IP address.
    #[error("Invalid IP address format: {0}")]
    InvalidIpFormat(String),

    /// The address is not a loopback, IPv4-mapped or 6to4 IPv6 form.
    #[error("IPv6 address cannot be converted to IPv4: {0}")]
    NotConvertible(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            IpUtilError::InvalidIpFormat("not-an-ip".to_string()).to_string(),
            "Invalid IP address format: not-an-ip"
        );
        assert_eq!(
            IpUtilError::NotConvertible("::1".to_string()).to_string(),
            "IPv6 address cannot be converted to IPv4: ::1"
        );
    }
}
