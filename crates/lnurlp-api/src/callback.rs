//! # Callback URL
//!
//! Rebuilds the absolute URL the wallet used to reach us, so the phase-1
//! `callback` points back at this endpoint on whatever host and scheme the
//! caller sees, including behind a reverse proxy.
//!
//! Precedence, per component:
//! - scheme: `Forwarded: proto=` > `X-Forwarded-Proto` > request URI > `http`
//! - host:   `Forwarded: host=`  > `X-Forwarded-Host`  > `Host` > request URI
//! - port:   `X-Forwarded-Port`, when the host carries none and it is not the
//!   scheme's default

use axum::http::{header, HeaderMap, Uri};

const AMOUNT_PARAM: &str = "amount";

/// Absolute URL of the current request, without any `amount` query pair
pub fn original_url(headers: &HeaderMap, uri: &Uri) -> String {
    let forwarded = headers
        .get(header::FORWARDED)
        .and_then(|v| v.to_str().ok())
        .map(parse_forwarded)
        .unwrap_or_default();

    let scheme = forwarded
        .proto
        .or_else(|| first_value(headers, "x-forwarded-proto"))
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string())
        .to_ascii_lowercase();

    let mut host = forwarded
        .host
        .or_else(|| first_value(headers, "x-forwarded-host"))
        .or_else(|| first_value(headers, header::HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string());

    if let Some(port) = first_value(headers, "x-forwarded-port") {
        if !has_port(&host) && !is_default_port(&scheme, &port) {
            host = format!("{}:{}", host, port);
        }
    }

    let mut url = format!("{}://{}{}", scheme, host, uri.path());
    if let Some(query) = uri.query().and_then(strip_amount) {
        url.push('?');
        url.push_str(&query);
    }
    url
}

#[derive(Debug, Default)]
struct Forwarded {
    proto: Option<String>,
    host: Option<String>,
}

/// RFC 7239 `Forwarded` header; only the first (client-most) element counts
fn parse_forwarded(value: &str) -> Forwarded {
    let mut forwarded = Forwarded::default();
    let first = value.split(',').next().unwrap_or_default();

    for pair in first.split(';') {
        let Some((key, val)) = pair.split_once('=') else {
            continue;
        };
        let val = val.trim().trim_matches('"').to_string();
        if val.is_empty() {
            continue;
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "proto" => forwarded.proto = Some(val),
            "host" => forwarded.host = Some(val),
            _ => {}
        }
    }
    forwarded
}

/// First comma-separated value of a header, trimmed
fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn has_port(host: &str) -> bool {
    // IPv6 literals carry colons inside brackets
    match host.rfind(']') {
        Some(end) => host[end..].contains(':'),
        None => host.contains(':'),
    }
}

fn is_default_port(scheme: &str, port: &str) -> bool {
    matches!((scheme, port), ("http", "80") | ("https", "443"))
}

/// Keys are compared percent-decoded, the way the `Query` extractor sees them;
/// kept pairs are copied through in their original encoding.
fn strip_amount(query: &str) -> Option<String> {
    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| !is_amount_pair(pair))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("&"))
    }
}

fn is_amount_pair(pair: &str) -> bool {
    form_urlencoded::parse(pair.as_bytes())
        .next()
        .is_some_and(|(key, _)| key == AMOUNT_PARAM)
}
