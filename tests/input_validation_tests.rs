//! Boundary validator tests: SSRF, argument injection, identifier alphabet

use kodegen_tools_seospider::security::{
    InputError, validate_cli_arg, validate_db_id, validate_url,
};
use proptest::prelude::*;

#[test]
fn test_public_urls_are_accepted() {
    for url in [
        "https://example.com",
        "http://example.com:8080/path?q=1#frag",
        "https://sub.domain.example.org/",
        "https://8.8.8.8/",
        "https://[2606:4700:4700::1111]/",
    ] {
        assert!(validate_url(url).is_ok(), "{url} should be accepted");
    }
}

#[test]
fn test_non_http_schemes_are_rejected() {
    for url in [
        "file:///etc/passwd",
        "ftp://example.com/",
        "gopher://example.com/",
        "javascript:alert(1)",
    ] {
        assert!(
            matches!(validate_url(url), Err(InputError::DisallowedScheme(_))),
            "{url} should be rejected by scheme"
        );
    }
}

#[test]
fn test_malformed_urls_are_rejected() {
    for url in ["", "example.com", "http://", "not a url"] {
        assert!(validate_url(url).is_err(), "{url:?} should be rejected");
    }
}

#[test]
fn test_internal_addresses_are_rejected() {
    for url in [
        "http://127.0.0.1/",
        "http://127.1.2.3:8080/",
        "http://10.0.0.1/",
        "http://172.16.0.1/",
        "http://172.31.255.255/",
        "http://192.168.1.1/",
        "http://169.254.169.254/latest/meta-data/",
        "http://0.0.0.0/",
        "http://[::1]/",
        "http://[fe80::1]/",
        "http://[fd00::1]/",
        "http://[::ffff:10.0.0.1]/",
        // Alternate IPv4 notations normalize to the same address
        "http://0x7f000001/",
        "http://2130706433/",
    ] {
        assert!(
            matches!(validate_url(url), Err(InputError::PrivateAddress(_))),
            "{url} should be rejected as internal"
        );
    }
}

#[test]
fn test_reserved_and_special_purpose_ranges_are_rejected() {
    for url in [
        "http://100.64.0.1/",
        "http://192.0.0.8/",
        "http://192.0.2.10/",
        "http://198.18.0.1/",
        "http://198.19.255.254/",
        "http://198.51.100.7/",
        "http://203.0.113.9/",
        "http://240.0.0.1/",
        "http://255.255.255.255/",
        "http://[2001:db8::1]/",
        "http://[2001:10::1]/",
        "http://[100::1]/",
        "http://[::ffff:198.18.0.1]/",
    ] {
        assert!(
            matches!(validate_url(url), Err(InputError::PrivateAddress(_))),
            "{url} should be rejected as internal"
        );
    }

    // Neighbours of those ranges stay public.
    for url in [
        "http://100.128.0.1/",
        "http://192.0.3.1/",
        "http://198.20.0.1/",
        "http://223.255.255.1/",
        "http://[2001:4860:4860::8888]/",
    ] {
        assert!(validate_url(url).is_ok(), "{url} should be accepted");
    }
}

#[test]
fn test_denylisted_hosts_are_rejected() {
    for url in [
        "http://localhost/",
        "http://LOCALHOST:3000/",
        "http://metadata.google.internal/computeMetadata/v1/",
        "http://Metadata.Internal/",
        "http://api.localhost/",
    ] {
        assert!(
            matches!(validate_url(url), Err(InputError::BlockedHost(_))),
            "{url} should be denylisted"
        );
    }
}

#[test]
fn test_dns_names_are_not_resolved() {
    // A name that resolves to an internal address is not caught at this layer.
    assert!(validate_url("http://internal.example.net/").is_ok());
}

#[test]
fn test_cli_arg_rejection_message_names_parameter() {
    let err = validate_cli_arg("  --output-folder=/etc", "export_tabs").unwrap_err();
    assert_eq!(err.to_string(), "export_tabs must not start with '-'");
    assert!(validate_cli_arg("Internal:All,H1:Missing", "export_tabs").is_ok());
    assert!(validate_cli_arg("All Inlinks,All-Outlinks", "bulk_export").is_ok());
}

#[test]
fn test_db_id_alphabet() {
    for ok in ["1234", "abc_def", "crawl.v2", "a-b-c", "A1.b_2-c"] {
        assert!(validate_db_id(ok).is_ok(), "{ok} should be accepted");
    }
    assert!(matches!(
        validate_db_id("-x"),
        Err(InputError::LeadingDash { .. })
    ));
    for bad in ["", "a b", "a/b", "../x", "a;rm", "é"] {
        assert!(
            matches!(validate_db_id(bad), Err(InputError::InvalidCharacters { .. })),
            "{bad:?} should be rejected"
        );
    }
}

proptest! {
    #[test]
    fn prop_private_ipv4_literals_are_rejected(
        block in 0usize..5,
        a in any::<u8>(),
        b in any::<u8>(),
        c in any::<u8>(),
        port in proptest::option::of(1u16..),
    ) {
        let host = match block {
            0 => format!("10.{a}.{b}.{c}"),
            1 => format!("172.{}.{b}.{c}", 16 + (a % 16)),
            2 => format!("192.168.{b}.{c}"),
            3 => format!("127.{a}.{b}.{c}"),
            _ => format!("169.254.{b}.{c}"),
        };
        let url = match port {
            Some(port) => format!("http://{host}:{port}/"),
            None => format!("https://{host}/"),
        };
        prop_assert!(matches!(validate_url(&url), Err(InputError::PrivateAddress(_))));
    }

    #[test]
    fn prop_leading_dash_is_always_rejected(
        ws in "[ \t]{0,3}",
        rest in "[ -~]{0,24}",
    ) {
        let value = format!("{ws}-{rest}");
        prop_assert!(validate_cli_arg(&value, "export_tabs").is_err());

        let id = format!("-{rest}");
        prop_assert!(validate_db_id(&id).is_err());
    }

    #[test]
    fn prop_identifier_with_foreign_character_is_rejected(
        prefix in "[A-Za-z0-9_.]{0,8}",
        bad in r#"[ /\\;:$&|'"!@#%^*()<>?,=+~`]"#,
        suffix in "[A-Za-z0-9_.-]{0,8}",
    ) {
        let id = format!("{prefix}{bad}{suffix}");
        prop_assert!(validate_db_id(&id).is_err());
    }

    #[test]
    fn prop_identifier_alphabet_is_accepted(id in "[A-Za-z0-9_.][A-Za-z0-9_.-]{0,16}") {
        prop_assert!(validate_db_id(&id).is_ok());
    }
}
