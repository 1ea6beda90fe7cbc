//! Display-name extraction from nginx configuration text.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// File could not be read.
pub const UNKNOWN: &str = "unknown";
/// No `server_name`, but the file proxies requests.
pub const REVERSE_PROXY: &str = "reverse_proxy";
/// No `server_name` and no proxy, but it declares locations.
pub const LOCATION_CONFIG: &str = "location_config";
/// None of the above.
pub const NO_SERVER_NAME: &str = "no_server_name";

fn server_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"server_name\s+([^;]+);").expect("server_name pattern is valid"))
}

/// Returns the first `server_name` value, or a sentinel classifying the file.
pub fn extract_server_name(content: &str) -> String {
    if let Some(value) = server_name_pattern()
        .captures(content)
        .and_then(|c| c.get(1))
    {
        return value.as_str().trim().to_string();
    }

    let sentinel = if content.contains("proxy_pass") {
        REVERSE_PROXY
    } else if content.contains("location") {
        LOCATION_CONFIG
    } else {
        NO_SERVER_NAME
    };
    sentinel.to_string()
}

/// Reads a file and extracts its display name. Invalid UTF-8 is replaced, not rejected.
pub fn read_server_name(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(extract_server_name(&String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_and_trims_server_name() {
        assert_eq!(extract_server_name("server_name example.com;"), "example.com");
        let content = "server {\n    listen 80;\n    server_name   www.a.io a.io  ;\n}\n";
        assert_eq!(extract_server_name(content), "www.a.io a.io");
    }

    #[test]
    fn first_directive_wins() {
        let content = "server { server_name one.test; }\nserver { server_name two.test; }";
        assert_eq!(extract_server_name(content), "one.test");
    }

    #[test]
    fn falls_back_to_sentinels_in_order() {
        assert_eq!(
            extract_server_name("location / { proxy_pass http://x; }"),
            REVERSE_PROXY
        );
        assert_eq!(extract_server_name("location /static { root /srv; }"), LOCATION_CONFIG);
        assert_eq!(extract_server_name("upstream app { server 127.0.0.1:8000; }"), NO_SERVER_NAME);
        assert_eq!(extract_server_name(""), NO_SERVER_NAME);
    }

    #[test]
    fn directive_without_terminator_is_not_a_match() {
        assert_eq!(extract_server_name("server_name dangling"), NO_SERVER_NAME);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_server_name(&dir.path().join("gone.conf")).is_err());
    }
}
