//! Log sanitization utilities
//!
//! Keeps API keys and oversized provider responses out of debug/error logs.

/// Maximum number of bytes of a response body included in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_CHARS: usize = 4;

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged. Longer strings are cut at the last
/// character boundary before the limit and suffixed with the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret for logging, keeping only a short prefix.
///
/// `"abcd1234efgh"` becomes `"abcd********"`. Secrets at or below the visible length are
/// fully masked.
pub fn mask_secret(secret: &str) -> String {
    let total = secret.chars().count();
    if total <= VISIBLE_SECRET_CHARS {
        return "*".repeat(total);
    }
    let prefix: String = secret.chars().take(VISIBLE_SECRET_CHARS).collect();
    format!("{prefix}{}", "*".repeat(total - VISIBLE_SECRET_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = r#"{"success":true}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "é".repeat(300);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total 600 bytes]"));
    }

    #[test]
    fn mask_keeps_prefix() {
        assert_eq!(mask_secret("abcd1234efgh"), "abcd********");
    }

    #[test]
    fn mask_short_secret_fully() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }
}
