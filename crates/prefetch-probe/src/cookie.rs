//! Request cookie lookup and `count` value parsing.

use crate::error::{ProbeError, ProbeResult};

/// Name of the per-client request counter cookie.
pub const COUNT_COOKIE: &str = "count";

/// Find the first cookie called `name` across one or more `Cookie` header values.
///
/// Pairs are `;`-separated. Whitespace around names and values is ignored,
/// as are surrounding double quotes on the value. Fragments without `=`
/// are skipped.
pub fn find_cookie<'a, I>(headers: I, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| unquote(value.trim()))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse a `count` cookie value into an integer.
///
/// Leading and trailing whitespace and a single sign are accepted.
pub fn parse_count(raw: &str) -> ProbeResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| ProbeError::InvalidCookie {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
