//! Opaque resource tokens

use uuid::Uuid;

/// Hex characters taken from a v4 UUID
const TOKEN_HEX_LEN: usize = 8;

/// `<prefix>-xxxxxxxx`, regenerated until `taken` rejects it
pub fn generate_token(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let hex = Uuid::new_v4().simple().to_string();
        let token = format!("{prefix}-{}", &hex[..TOKEN_HEX_LEN]);
        if !taken(&token) {
            return token;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_shape() {
        let token = generate_token("crawl", |_| false);
        assert!(token.starts_with("crawl-"));
        let hex = token.trim_start_matches("crawl-");
        assert_eq!(hex.len(), TOKEN_HEX_LEN);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn collisions_are_regenerated() {
        let first = generate_token("export", |_| false);
        let second = generate_token("export", |t| t == first);
        assert_ne!(first, second);
    }
}
