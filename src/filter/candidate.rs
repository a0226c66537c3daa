// src/filter/candidate.rs
// =============================================================================
// This module parses an href into its URL components.
//
// Hrefs found in pages are usually *relative* ("/about", "docs/intro",
// "?page=2", "#top"). The `url` crate only represents absolute URLs, so
// `Url::parse("/about")` fails and `Url::join` would resolve the reference
// against a page before we get to look at it. The filter needs the reference
// as written: does it have a fragment? is the host empty?
//
// CandidateUrl keeps each component separately:
//
//   https://user@www.example.com:8080/docs/intro?lang=en#setup
//   \___/   \__/ \__________________/\_________/ \_____/ \___/
//   scheme  user        host             path     query  fragment
//
// Rust concepts:
// - FromStr / Display: parse from and format back to a string
// - Option<String>: components that may be absent
// - Byte-level string scanning with as_bytes()
// =============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::UrlParseError;

// A URL reference split into components
//
// All components except scheme are stored as written (escapes intact).
// `opaque` is set for references like "mailto:a@b.c" whose scheme is not
// followed by a '/'.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateUrl {
    pub scheme: String,
    pub opaque: String,
    pub userinfo: Option<String>,
    pub host: String,
    pub path: String,
    pub query: String,
    pub force_query: bool,
    pub fragment: String,
}

impl CandidateUrl {
    // Parses a relative or absolute URL reference
    //
    // Examples:
    //   "/about"               -> path "/about", empty host
    //   "//cdn.example.com/x"  -> host "cdn.example.com", path "/x"
    //   "#top"                 -> fragment "top"
    //   "mailto:a@b.c"         -> scheme "mailto", opaque "a@b.c"
    //   "%zz"                  -> Err(InvalidEscape)
    pub fn parse(raw: &str) -> Result<Self, UrlParseError> {
        if raw.bytes().any(|b| b < 0x20 || b == 0x7f) {
            return Err(UrlParseError::ControlCharacter);
        }

        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, fragment),
            None => (raw, ""),
        };
        validate_escapes(fragment)?;

        let mut url = CandidateUrl {
            fragment: fragment.to_string(),
            ..Default::default()
        };

        if rest == "*" {
            url.path = rest.to_string();
            return Ok(url);
        }

        let (scheme, rest) = split_scheme(rest)?;
        url.scheme = scheme.to_ascii_lowercase();

        let rest = if rest.ends_with('?') && rest.matches('?').count() == 1 {
            url.force_query = true;
            &rest[..rest.len() - 1]
        } else if let Some((before, query)) = rest.split_once('?') {
            url.query = query.to_string();
            before
        } else {
            rest
        };

        if !rest.starts_with('/') {
            if !url.scheme.is_empty() {
                // "mailto:a@b.c", "javascript:void(0)"
                url.opaque = rest.to_string();
                return Ok(url);
            }
            let first_segment = rest.split('/').next().unwrap_or("");
            if first_segment.contains(':') {
                return Err(UrlParseError::ColonInFirstSegment);
            }
        }

        let mut rest = rest;
        if (!url.scheme.is_empty() || !rest.starts_with("///")) && rest.starts_with("//") {
            let after_slashes = &rest[2..];
            let (authority, path) = match after_slashes.find('/') {
                Some(i) => after_slashes.split_at(i),
                None => (after_slashes, ""),
            };
            let (userinfo, host) = parse_authority(authority)?;
            url.userinfo = userinfo;
            url.host = host;
            rest = path;
        }

        validate_escapes(rest)?;
        url.path = rest.to_string();

        Ok(url)
    }
}

impl FromStr for CandidateUrl {
    type Err = UrlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CandidateUrl::parse(s)
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}:", self.scheme)?;
        }

        if !self.opaque.is_empty() {
            f.write_str(&self.opaque)?;
        } else {
            let has_authority =
                !self.scheme.is_empty() || !self.host.is_empty() || self.userinfo.is_some();
            if has_authority
                && (!self.host.is_empty() || !self.path.is_empty() || self.userinfo.is_some())
            {
                f.write_str("//")?;
            }
            if let Some(userinfo) = &self.userinfo {
                write!(f, "{}@", userinfo)?;
            }
            f.write_str(&self.host)?;

            if !self.path.is_empty() && !self.path.starts_with('/') && !self.host.is_empty() {
                f.write_str("/")?;
            }
            f.write_str(&escape_path(&self.path))?;
        }

        if self.force_query || !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

// Splits "scheme:rest" into its two parts
//
// A reference whose first character is not a letter, or that contains a
// non-scheme character before any ':', simply has no scheme.
fn split_scheme(raw: &str) -> Result<(&str, &str), UrlParseError> {
    for (i, c) in raw.bytes().enumerate() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' if i > 0 => {}
            b':' if i == 0 => return Err(UrlParseError::MissingScheme),
            b':' => return Ok((&raw[..i], &raw[i + 1..])),
            _ => return Ok(("", raw)),
        }
    }
    Ok(("", raw))
}

// Splits "user:pass@host:port" into userinfo and host
fn parse_authority(authority: &str) -> Result<(Option<String>, String), UrlParseError> {
    let (userinfo, host) = match authority.rfind('@') {
        Some(i) => (Some(&authority[..i]), &authority[i + 1..]),
        None => (None, authority),
    };

    if let Some(userinfo) = userinfo {
        if !userinfo.chars().all(is_userinfo_char) {
            return Err(UrlParseError::InvalidUserinfo);
        }
        validate_escapes(userinfo)?;
    }

    validate_host(host)?;

    Ok((userinfo.map(str::to_string), host.to_string()))
}

fn validate_host(host: &str) -> Result<(), UrlParseError> {
    let port = if host.starts_with('[') {
        // IPv6 literal: "[::1]:8080"
        let close = host.rfind(']').ok_or(UrlParseError::UnclosedBracket)?;
        &host[close + 1..]
    } else {
        match host.rfind(':') {
            Some(i) => &host[i..],
            None => "",
        }
    };

    if !port.is_empty() {
        let digits = port.strip_prefix(':').unwrap_or(port);
        if !port.starts_with(':') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UrlParseError::InvalidPort(port.to_string()));
        }
    }

    if let Some(bad) = host.chars().find(|c| c.is_ascii() && !is_host_char(*c)) {
        return Err(UrlParseError::InvalidHostCharacter(bad));
    }
    validate_escapes(host)
}

// Every '%' must start a two-digit hex escape
fn validate_escapes(s: &str) -> Result<(), UrlParseError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => {
                    let end = (i + 3).min(bytes.len());
                    let shown = String::from_utf8_lossy(&bytes[i..end]).into_owned();
                    return Err(UrlParseError::InvalidEscape(shown));
                }
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:[]<>\"%".contains(c)
}

fn is_userinfo_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._:~!$&'()*+,;=%@".contains(c)
}

// Percent-encodes path bytes that may not appear literally in a URL
//
// Existing escapes are kept as they are.
fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for byte in path.bytes() {
        let c = byte as char;
        if byte.is_ascii_alphanumeric() || "-_.~!$&'()*+,;=:@[]/%".contains(c) {
            escaped.push(c);
        } else {
            escaped.push_str(&format!("%{:02X}", byte));
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let url = CandidateUrl::parse("https://user@www.example.com:8080/docs/intro?lang=en#setup")
            .unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.userinfo.as_deref(), Some("user"));
        assert_eq!(url.host, "www.example.com:8080");
        assert_eq!(url.path, "/docs/intro");
        assert_eq!(url.query, "lang=en");
        assert_eq!(url.fragment, "setup");
    }

    #[test]
    fn test_parse_relative_path() {
        let url = CandidateUrl::parse("/about").unwrap();
        assert_eq!(url.scheme, "");
        assert_eq!(url.host, "");
        assert_eq!(url.path, "/about");
        assert_eq!(url.to_string(), "/about");
    }

    #[test]
    fn test_parse_fragment_only() {
        let url = CandidateUrl::parse("#top").unwrap();
        assert_eq!(url.fragment, "top");
        assert_eq!(url.path, "");
    }

    #[test]
    fn test_parse_protocol_relative() {
        let url = CandidateUrl::parse("//cdn.example.com/lib.js").unwrap();
        assert_eq!(url.scheme, "");
        assert_eq!(url.host, "cdn.example.com");
        assert_eq!(url.path, "/lib.js");
    }

    #[test]
    fn test_triple_slash_without_scheme_is_a_path() {
        let url = CandidateUrl::parse("///etc/hosts").unwrap();
        assert_eq!(url.host, "");
        assert_eq!(url.path, "///etc/hosts");
    }

    #[test]
    fn test_parse_opaque() {
        let url = CandidateUrl::parse("mailto:someone@example.com").unwrap();
        assert_eq!(url.scheme, "mailto");
        assert_eq!(url.opaque, "someone@example.com");
        assert_eq!(url.host, "");
        assert_eq!(url.to_string(), "mailto:someone@example.com");
    }

    #[test]
    fn test_scheme_is_lowercased() {
        let url = CandidateUrl::parse("HTTPS://Example.com/").unwrap();
        assert_eq!(url.scheme, "https");
        assert_eq!(url.host, "Example.com");
    }

    #[test]
    fn test_query_and_forced_query() {
        let url = CandidateUrl::parse("/search?q=rust&page=2").unwrap();
        assert_eq!(url.query, "q=rust&page=2");
        assert_eq!(url.to_string(), "/search?q=rust&page=2");

        let url = CandidateUrl::parse("/search?").unwrap();
        assert!(url.force_query);
        assert_eq!(url.to_string(), "/search?");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            CandidateUrl::parse(":foo"),
            Err(UrlParseError::MissingScheme)
        );
        assert_eq!(
            CandidateUrl::parse("/bad%zzescape"),
            Err(UrlParseError::InvalidEscape("%zz".to_string()))
        );
        assert_eq!(
            CandidateUrl::parse("a/b\nc"),
            Err(UrlParseError::ControlCharacter)
        );
        assert_eq!(
            CandidateUrl::parse("1a:b"),
            Err(UrlParseError::ColonInFirstSegment)
        );
        assert_eq!(
            CandidateUrl::parse("http://example.com:80x/"),
            Err(UrlParseError::InvalidPort(":80x".to_string()))
        );
        assert_eq!(
            CandidateUrl::parse("http://exa mple.com/"),
            Err(UrlParseError::InvalidHostCharacter(' '))
        );
        assert_eq!(
            CandidateUrl::parse("http://[::1/"),
            Err(UrlParseError::UnclosedBracket)
        );
    }

    #[test]
    fn test_ipv6_host() {
        let url = CandidateUrl::parse("http://[::1]:8080/x").unwrap();
        assert_eq!(url.host, "[::1]:8080");
        assert_eq!(url.path, "/x");
    }

    #[test]
    fn test_display_inserts_slash_before_relative_path() {
        let url = CandidateUrl {
            scheme: "https".to_string(),
            host: "example.com".to_string(),
            path: "about".to_string(),
            ..Default::default()
        };
        assert_eq!(url.to_string(), "https://example.com/about");
    }

    #[test]
    fn test_display_escapes_path() {
        let url = CandidateUrl::parse("/a b/caf\u{e9}").unwrap();
        assert_eq!(url.to_string(), "/a%20b/caf%C3%A9");

        let url = CandidateUrl::parse("/already%20escaped").unwrap();
        assert_eq!(url.to_string(), "/already%20escaped");
    }

    #[test]
    fn test_absolute_urls_agree_with_url_crate() {
        let hrefs = [
            "https://example.com/docs/intro?lang=en#setup",
            "http://www.example.com:8080/a/b.html",
            "https://user:pw@example.com/private?x=1&y=2",
            "http://[::1]:3000/status",
            "https://example.com/a%20b",
        ];
        for href in hrefs {
            let ours = CandidateUrl::parse(href).unwrap();
            let theirs = url::Url::parse(href).unwrap();

            assert_eq!(ours.scheme, theirs.scheme(), "{}", href);
            let host = match theirs.port() {
                Some(port) => format!("{}:{}", theirs.host_str().unwrap(), port),
                None => theirs.host_str().unwrap().to_string(),
            };
            assert_eq!(ours.host, host, "{}", href);
            assert_eq!(ours.path, theirs.path(), "{}", href);
            assert_eq!(ours.query, theirs.query().unwrap_or(""), "{}", href);
            assert_eq!(ours.fragment, theirs.fragment().unwrap_or(""), "{}", href);
            assert_eq!(ours.to_string(), theirs.as_str(), "{}", href);
        }
    }

    #[test]
    fn test_host_case_and_empty_path_kept_as_written() {
        // url::Url would give "https://example.com/"; the crawl compares
        // URLs as exact strings, so the reference is kept as written
        let url = CandidateUrl::parse("https://Example.com").unwrap();
        assert_eq!(url.host, "Example.com");
        assert_eq!(url.to_string(), "https://Example.com");
        assert_eq!(url::Url::parse("https://Example.com").unwrap().as_str(), "https://example.com/");
    }

    #[test]
    fn test_empty_fragment_is_dropped() {
        let url = CandidateUrl::parse("/page#").unwrap();
        assert_eq!(url.fragment, "");
        assert_eq!(url.to_string(), "/page");
    }
}
