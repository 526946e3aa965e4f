//! Network predicates: `url`, `activeUrl`, `isIp`.

use std::net::IpAddr;

use url::{Host, Url};

use crate::foundation::{EvalContext, Record};
use crate::rules::Arg;

// Schemes whose URLs must carry an authority ("scheme://host").
const AUTHORITY_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps", "ws", "wss", "file"];

/// Parses a URL string; `None` when it is not a well-formed absolute URL.
pub(crate) fn parse_url(input: &str) -> Option<Url> {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return None;
    }

    let url = Url::parse(input).ok()?;

    if AUTHORITY_SCHEMES.contains(&url.scheme()) {
        let rest = input.get(url.scheme().len() + 1..)?;
        if !rest.starts_with("//") {
            return None;
        }
    }

    Some(url)
}

/// String holding a syntactically valid absolute URL.
pub fn url(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    record.value(field).as_str().and_then(parse_url).is_some()
}

/// A valid URL whose host resolves.
///
/// IP-literal hosts count as resolved. The lookup is bounded by the
/// context's DNS timeout; failure or timeout fails the check.
pub fn active_url(record: &Record, field: &str, _arg: &Arg, ctx: &EvalContext<'_>) -> bool {
    let Some(url) = record.value(field).as_str().and_then(parse_url) else {
        return false;
    };

    match url.host() {
        Some(Host::Domain(domain)) => ctx.resolver().resolves(domain, ctx.dns_timeout()),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        None => false,
    }
}

/// String holding an IPv4 or IPv6 address.
pub fn is_ip(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    record
        .value(field)
        .as_str()
        .is_some_and(|s| s.parse::<IpAddr>().is_ok())
}
