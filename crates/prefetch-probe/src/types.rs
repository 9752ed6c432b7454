//! Request and outcome types for the prefetch probe.

use std::fmt;

use serde::Serialize;

/// The parts of an incoming request the probe looks at.
///
/// Transport layers fill this in from the query string, the `Sec-Purpose`
/// header, and the `count` cookie. Absent inputs stay `None`. The purpose
/// header is kept as raw bytes and decoded by the probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeRequest {
    pub uuid: Option<String>,
    pub origin: Option<String>,
    pub sec_purpose: Option<Vec<u8>>,
    pub count_cookie: Option<String>,
}

impl ProbeRequest {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_sec_purpose(mut self, purpose: impl Into<Vec<u8>>) -> Self {
        self.sec_purpose = Some(purpose.into());
        self
    }

    pub fn with_count_cookie(mut self, value: impl Into<String>) -> Self {
        self.count_cookie = Some(value.into());
        self
    }
}

/// JSON body returned to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeCounts {
    /// Prefetch-purpose requests seen for this key before the current one.
    pub prefetch: u64,
    /// Value of the incoming `count` cookie.
    pub cookie: i64,
}

/// CORS headers echoed back when the harness names an origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsGrant {
    pub allow_origin: String,
    pub allow_credentials: bool,
}

impl CorsGrant {
    pub fn for_origin(origin: &str) -> Self {
        Self {
            allow_origin: origin.to_string(),
            allow_credentials: true,
        }
    }
}

/// An outgoing `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    /// Rendered as `SameSite=None; Secure`.
    pub cross_site: bool,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: "/".to_string(),
            cross_site: false,
        }
    }

    /// Mark the cookie so browsers attach it to cross-site requests.
    pub fn cross_site(mut self) -> Self {
        self.cross_site = true;
        self
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path={}", self.name, self.value, self.path)?;
        if self.cross_site {
            f.write_str("; SameSite=None; Secure")?;
        }
        Ok(())
    }
}

/// Everything the transport needs to build the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub counts: ProbeCounts,
    pub cors: Option<CorsGrant>,
    pub set_cookie: SetCookie,
    /// Whether this request was classified as a prefetch.
    pub prefetch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cookie_cross_site_rendering() {
        let cookie = SetCookie::new("count", "6").cross_site();
        assert_eq!(cookie.to_string(), "count=6; Path=/; SameSite=None; Secure");
    }

    #[test]
    fn test_set_cookie_plain_rendering() {
        let cookie = SetCookie::new("count", "1");
        assert_eq!(cookie.to_string(), "count=1; Path=/");
    }

    #[test]
    fn test_counts_serialize_field_names() {
        let body = serde_json::to_value(ProbeCounts {
            prefetch: 2,
            cookie: 5,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"prefetch": 2, "cookie": 5}));
    }
}
