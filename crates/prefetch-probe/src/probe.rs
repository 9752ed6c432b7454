//! The probe operation: classify the request, account for the cookie, and
//! bump the per-key prefetch counter.

use std::sync::Arc;

use crate::cookie::{parse_count, COUNT_COOKIE};
use crate::error::{ProbeError, ProbeResult};
use crate::store::{CounterStore, StashKey};
use crate::types::{CorsGrant, ProbeCounts, ProbeOutcome, ProbeRequest, SetCookie};

/// `Sec-Purpose` prefix that marks a speculative request.
pub const PREFETCH_PURPOSE: &str = "prefetch";

/// Whether a `Sec-Purpose` value marks the request as a prefetch.
pub fn is_prefetch(sec_purpose: Option<&str>) -> bool {
    sec_purpose.is_some_and(|purpose| purpose.starts_with(PREFETCH_PURPOSE))
}

/// Decode raw `Sec-Purpose` bytes. Anything that is not UTF-8 is an error.
pub fn decode_purpose(raw: Option<&[u8]>) -> ProbeResult<Option<&str>> {
    raw.map(std::str::from_utf8)
        .transpose()
        .map_err(|e| ProbeError::InvalidPurpose(e.to_string()))
}

/// Prefetch probe bound to a stash and the scope its keys live under.
#[derive(Clone)]
pub struct PrefetchProbe {
    store: Arc<dyn CounterStore>,
    scope: String,
}

impl PrefetchProbe {
    pub fn new(store: Arc<dyn CounterStore>, scope: impl Into<String>) -> Self {
        Self {
            store,
            scope: scope.into(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn store(&self) -> &Arc<dyn CounterStore> {
        &self.store
    }

    /// Handle one request.
    ///
    /// The returned `prefetch` count is the value taken from the stash,
    /// before this request's own increment. Prefetch requests write back the
    /// incremented counter. Any other request restores what it took, so the
    /// stored count only ever reflects prefetch-purpose requests.
    pub fn handle(&self, request: &ProbeRequest) -> ProbeResult<ProbeOutcome> {
        let cors = request.origin.as_deref().map(CorsGrant::for_origin);

        let uuid = request
            .uuid
            .as_deref()
            .ok_or(ProbeError::MissingParameter("uuid"))?;

        let prefetch = is_prefetch(decode_purpose(request.sec_purpose.as_deref())?);

        let cookie = match request.count_cookie.as_deref() {
            Some(raw) => parse_count(raw)?,
            None => 0,
        };
        let next_cookie = cookie
            .checked_add(1)
            .ok_or(ProbeError::CookieOverflow(cookie))?;

        let key = StashKey::new(&self.scope, uuid);
        let stored = self.store.take(&key);
        let taken = stored.unwrap_or(0);
        if prefetch {
            self.store.put(key, taken.saturating_add(1));
        } else if let Some(previous) = stored {
            self.store.put(key, previous);
        }

        tracing::debug!(
            "probe {} uuid={uuid}: prefetch={prefetch} taken={taken} cookie={cookie}",
            self.scope
        );

        Ok(ProbeOutcome {
            counts: ProbeCounts {
                prefetch: taken,
                cookie,
            },
            cors,
            set_cookie: SetCookie::new(COUNT_COOKIE, next_cookie.to_string()).cross_site(),
            prefetch,
        })
    }
}
