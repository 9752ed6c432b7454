//! Error types for the probe operation.

/// Stable machine-readable error codes.
pub mod error_codes {
    pub const MISSING_PARAMETER: &str = "E_MISSING_PARAMETER";
    pub const INVALID_PURPOSE: &str = "E_INVALID_PURPOSE";
    pub const INVALID_COOKIE: &str = "E_INVALID_COOKIE";
    pub const COOKIE_OVERFLOW: &str = "E_COOKIE_OVERFLOW";
}

/// All errors the probe can raise while handling a request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// A required query parameter was absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The `Sec-Purpose` header is not valid UTF-8.
    #[error("Invalid Sec-Purpose header: {0}")]
    InvalidPurpose(String),

    /// The `count` cookie is not an integer.
    #[error("Invalid count cookie {value:?}: {reason}")]
    InvalidCookie { value: String, reason: String },

    /// The next cookie value does not fit in an i64.
    #[error("Count cookie {0} cannot be incremented")]
    CookieOverflow(i64),
}

impl ProbeError {
    pub fn code(&self) -> &'static str {
        use error_codes::*;
        match self {
            ProbeError::MissingParameter(_) => MISSING_PARAMETER,
            ProbeError::InvalidPurpose(_) => INVALID_PURPOSE,
            ProbeError::InvalidCookie { .. } => INVALID_COOKIE,
            ProbeError::CookieOverflow(_) => COOKIE_OVERFLOW,
        }
    }

    /// Whether the failure is attributable to the request (4xx) rather than
    /// an unhandled parse failure inside the handler (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProbeError::MissingParameter(_))
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            ProbeError::MissingParameter("uuid").code(),
            "E_MISSING_PARAMETER"
        );
        assert_eq!(ProbeError::CookieOverflow(i64::MAX).code(), "E_COOKIE_OVERFLOW");
    }

    #[test]
    fn test_only_missing_parameter_is_client_error() {
        assert!(ProbeError::MissingParameter("uuid").is_client_error());
        let bad = ProbeError::InvalidCookie {
            value: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert!(!bad.is_client_error());
        assert!(!ProbeError::InvalidPurpose("invalid utf-8".to_string()).is_client_error());
        assert_eq!(bad.to_string(), "Invalid count cookie \"abc\": invalid digit found in string");
    }
}
