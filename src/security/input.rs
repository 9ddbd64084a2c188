//! Input validators for URLs, Tool arguments and database identifiers

use crate::error::BrokerError;
use crate::utils::CONFIG_FILE_EXTENSION;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::{Host, Url};

/// Hostnames rejected regardless of what they resolve to
const BLOCKED_HOSTS: &[&str] = &[
    "localhost",
    "metadata.google.internal",
    "metadata.gke.internal",
    "metadata.internal",
    "instance-data",
];

/// Reason an input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid URL format: {0}")]
    MalformedUrl(String),

    #[error("Only http/https URLs are allowed, got: {0}")]
    DisallowedScheme(String),

    #[error("URL must include a hostname.")]
    MissingHost,

    #[error("Internal/private addresses are not allowed: {0}")]
    PrivateAddress(IpAddr),

    #[error("Blocked hostname: {0}")]
    BlockedHost(String),

    #[error("{name} must not start with '-'")]
    LeadingDash { name: String },

    #[error("{name} contains invalid characters")]
    InvalidCharacters { name: String },

    #[error("Config file must have .{CONFIG_FILE_EXTENSION} extension.")]
    ConfigExtension,

    #[error("Config file not found.")]
    ConfigMissing,
}

impl From<InputError> for BrokerError {
    fn from(error: InputError) -> Self {
        BrokerError::Validation(error.to_string())
    }
}

/// Validate a crawl target URL (SSRF gate)
///
/// Accepts only `http`/`https` URLs with a host. Literal IP hosts in
/// loopback, private or link-local ranges are rejected; DNS names are accepted
/// without resolution, so a name that resolves to an internal address is not
/// caught here.
///
/// # Errors
///
/// Returns the first `InputError` that applies.
pub fn validate_url(url: &str) -> Result<Url, InputError> {
    let parsed = Url::parse(url.trim()).map_err(|e| InputError::MalformedUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(InputError::DisallowedScheme(parsed.scheme().to_string()));
    }

    match parsed.host() {
        None => return Err(InputError::MissingHost),
        Some(Host::Ipv4(ip)) => check_ip(IpAddr::V4(ip))?,
        Some(Host::Ipv6(ip)) => check_ip(IpAddr::V6(ip))?,
        Some(Host::Domain(domain)) => {
            if domain.is_empty() {
                return Err(InputError::MissingHost);
            }
            let normalized = domain.trim_end_matches('.').to_ascii_lowercase();
            if BLOCKED_HOSTS.contains(&normalized.as_str()) || normalized.ends_with(".localhost") {
                return Err(InputError::BlockedHost(domain.to_string()));
            }
            // Non-special schemes are already rejected, but an IP-looking domain
            // must still go through the address check.
            if let Ok(ip) = normalized.parse::<IpAddr>() {
                check_ip(ip)?;
            }
        }
    }

    Ok(parsed)
}

fn check_ip(ip: IpAddr) -> Result<(), InputError> {
    let blocked = match ip {
        IpAddr::V4(v4) => is_internal_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_internal_v4(v4),
            None => is_internal_v6(v6),
        },
    };
    if blocked {
        Err(InputError::PrivateAddress(ip))
    } else {
        Ok(())
    }
}

fn is_internal_v4(ip: Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();
    ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_documentation()
        || a == 0
        // 100.64.0.0/10 shared address space
        || (a == 100 && (b & 0xc0) == 64)
        // 192.0.0.0/24 protocol assignments
        || (a == 192 && b == 0 && c == 0)
        // 198.18.0.0/15 benchmarking
        || (a == 198 && (b & 0xfe) == 18)
        // 240.0.0.0/4 reserved, including broadcast
        || a >= 240
}

fn is_internal_v6(ip: Ipv6Addr) -> bool {
    let s = ip.segments();
    ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_unique_local()
        || ip.is_unicast_link_local()
        // 2001:db8::/32 documentation
        || (s[0] == 0x2001 && s[1] == 0x0db8)
        // 2001::/23 protocol assignments
        || (s[0] == 0x2001 && s[1] < 0x0200)
        // 100::/64 discard-only
        || (s[0] == 0x0100 && s[1] == 0 && s[2] == 0 && s[3] == 0)
}

/// Reject free-text values that the Tool would parse as a flag
///
/// `name` is the parameter name used in the rejection message.
///
/// # Errors
///
/// Returns `InputError::LeadingDash` if the first non-whitespace character is `-`.
pub fn validate_cli_arg(value: &str, name: &str) -> Result<(), InputError> {
    if value.trim_start().starts_with('-') {
        return Err(InputError::LeadingDash {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validate an opaque crawl database identifier
///
/// Allowed alphabet: `[A-Za-z0-9_.-]`, non-empty, no leading dash.
///
/// # Errors
///
/// Returns `InputError::LeadingDash` or `InputError::InvalidCharacters`.
pub fn validate_db_id(db_id: &str) -> Result<(), InputError> {
    const NAME: &str = "db_id";

    if db_id.starts_with('-') {
        return Err(InputError::LeadingDash {
            name: NAME.to_string(),
        });
    }
    let valid = !db_id.is_empty()
        && db_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid {
        return Err(InputError::InvalidCharacters {
            name: NAME.to_string(),
        });
    }
    Ok(())
}

/// Resolve a crawl configuration file to an absolute canonical path
///
/// # Errors
///
/// Returns `InputError::ConfigExtension` or `InputError::ConfigMissing`.
pub fn validate_config_file(path: &str) -> Result<PathBuf, InputError> {
    let candidate = Path::new(path.trim());
    let has_extension = candidate
        .extension()
        .is_some_and(|ext| ext == CONFIG_FILE_EXTENSION);
    if !has_extension {
        return Err(InputError::ConfigExtension);
    }

    let resolved = candidate
        .canonicalize()
        .map_err(|_| InputError::ConfigMissing)?;
    if !resolved.is_file() {
        return Err(InputError::ConfigMissing);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_urls_pass() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1").is_ok());
        assert!(validate_url("https://93.184.216.34/").is_ok());
    }

    #[test]
    fn ipv4_mapped_loopback_is_rejected() {
        assert!(matches!(
            validate_url("http://[::ffff:127.0.0.1]/"),
            Err(InputError::PrivateAddress(_))
        ));
    }

    #[test]
    fn trailing_dot_does_not_bypass_denylist() {
        assert!(matches!(
            validate_url("http://LocalHost./"),
            Err(InputError::BlockedHost(_))
        ));
    }

    #[test]
    fn config_file_needs_extension() {
        assert_eq!(
            validate_config_file("/etc/passwd"),
            Err(InputError::ConfigExtension)
        );
        assert_eq!(
            validate_config_file("/nonexistent/crawl.seospiderconfig"),
            Err(InputError::ConfigMissing)
        );
    }
}
