//! Provider ID codec.
//!
//! A provider ID is the string the orchestration layer stores on a node to
//! identify its backing instance: `linode://` followed by the decimal
//! instance ID.

use thiserror::Error;

/// Scheme prefix shared by every Linode provider ID.
pub const PROVIDER_ID_PREFIX: &str = "linode://";

/// Returned when a string is not a well-formed provider ID.
///
/// Carries the offending input verbatim so it can be reported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid provider ID {0:?}")]
pub struct InvalidProviderId(pub String);

impl InvalidProviderId {
    /// The string that failed to parse.
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Parses a provider ID into its numeric instance ID.
///
/// The remainder after the prefix must parse as an `i64` in base 10. No
/// whitespace is trimmed and the sign is not checked.
///
/// # Example
/// ```rust
/// use linode_identity::provider_id;
///
/// assert_eq!(provider_id::parse("linode://42"), Ok(42));
/// assert!(provider_id::parse("42").is_err());
/// ```
pub fn parse(provider_id: &str) -> Result<i64, InvalidProviderId> {
    provider_id
        .strip_prefix(PROVIDER_ID_PREFIX)
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or_else(|| InvalidProviderId(provider_id.to_string()))
}

/// Formats a numeric instance ID as a provider ID.
pub fn format(id: i64) -> String {
    format!("{PROVIDER_ID_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse("linode://42"), Ok(42));
        assert_eq!(parse("linode://0"), Ok(0));
        assert_eq!(parse("linode://007"), Ok(7));
    }

    #[test]
    fn test_parse_missing_prefix() {
        assert_eq!(parse("42"), Err(InvalidProviderId("42".to_string())));
        assert_eq!(
            parse("aws://42"),
            Err(InvalidProviderId("aws://42".to_string()))
        );
        assert!(parse("LINODE://42").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_parse_bad_number() {
        assert_eq!(
            parse("linode://abc"),
            Err(InvalidProviderId("linode://abc".to_string()))
        );
        assert!(parse("linode://").is_err());
        assert!(parse("linode:// 42").is_err());
        assert!(parse("linode://42 ").is_err());
        assert!(parse("linode://4.2").is_err());
        assert!(parse("linode://99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse("linode://-5"), Ok(-5));
        assert_eq!(parse("linode://+5"), Ok(5));
    }

    #[test]
    fn test_error_message_quotes_input() {
        let err = parse("linode://x\"y").unwrap_err();
        assert_eq!(err.value(), "linode://x\"y");
        assert_eq!(err.to_string(), r#"invalid provider ID "linode://x\"y""#);
    }

    #[test]
    fn test_format() {
        assert_eq!(format(12345), "linode://12345");
        assert_eq!(parse(&format(12345)), Ok(12345));
    }
}
