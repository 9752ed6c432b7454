//! Axum handlers — translate HTTP requests into probe calls and back.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, COOKIE, SET_COOKIE,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use prefetch_probe::{find_cookie, ProbeOutcome, ProbeRequest, COUNT_COOKIE};

use crate::error::{ServerError, ServerResult};
use crate::server::AppState;

pub const SEC_PURPOSE: HeaderName = HeaderName::from_static("sec-purpose");

/// Build a [`ProbeRequest`] from decoded query pairs and request headers.
///
/// Repeated query parameters resolve to their first value. `Sec-Purpose`
/// is passed through as raw bytes; the probe rejects non-UTF-8 values.
pub fn probe_request(query: &[(String, String)], headers: &HeaderMap) -> ProbeRequest {
    let param = |name: &str| {
        query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };

    let sec_purpose = headers.get(SEC_PURPOSE).map(|v| v.as_bytes().to_vec());

    let count_cookie = find_cookie(
        headers.get_all(COOKIE).iter().filter_map(|v| v.to_str().ok()),
        COUNT_COOKIE,
    )
    .map(str::to_string);

    ProbeRequest {
        uuid: param("uuid"),
        origin: param("origin"),
        sec_purpose,
        count_cookie,
    }
}

/// Render a probe outcome as the JSON response the harness expects.
pub fn probe_response(outcome: ProbeOutcome) -> ServerResult<Response> {
    let mut headers = HeaderMap::new();

    if let Some(cors) = &outcome.cors {
        headers.insert(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            header_value(&cors.allow_origin)?,
        );
        if cors.allow_credentials {
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
    }

    headers.insert(SET_COOKIE, header_value(&outcome.set_cookie.to_string())?);

    Ok((StatusCode::OK, headers, Json(outcome.counts)).into_response())
}

fn header_value(value: &str) -> ServerResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ServerError::Transport(format!("invalid header value {value:?}: {e}")))
}

/// `GET <route>?uuid=…[&origin=…]`
pub async fn handle_probe(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> ServerResult<Response> {
    let request = probe_request(&query, &headers);
    let outcome = state.probe.handle(&request)?;
    probe_response(outcome)
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    pub route: String,
    pub stash_entries: usize,
}

/// Health check endpoint — reads stash size without touching any entry.
pub async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        started_at: state.started_at,
        route: state.probe.scope().to_string(),
        stash_entries: state.probe.store().len(),
    })
}
