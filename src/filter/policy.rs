// src/filter/policy.rs
// =============================================================================
// This module decides which links the crawler follows.
//
// Rules, checked in order:
// 1. A link with a fragment ("#section", "/page#top") is never followed
// 2. A link with no host ("/about", "docs", "?page=2") is always followed
// 3. A link with a host is followed only if the host is the root's host,
//    ignoring a leading "www"
//
// Every followed link is rewritten onto the root's scheme and host, so the
// crawl queue only ever holds absolute same-origin URLs.
// =============================================================================

use tracing::debug;

use super::candidate::CandidateUrl;

// Parses an href and returns the URL to enqueue, or None to drop it
//
// Unparseable hrefs are dropped silently (debug log only).
pub fn follow(href: &str, root: &CandidateUrl) -> Option<CandidateUrl> {
    let mut candidate = match CandidateUrl::parse(href) {
        Ok(candidate) => candidate,
        Err(e) => {
            debug!(href, error = %e, "discarding unparseable link");
            return None;
        }
    };

    if !should_follow(&candidate, root) {
        debug!(href, "not following link");
        return None;
    }

    canonicalize(&mut candidate, root);
    Some(candidate)
}

pub fn should_follow(candidate: &CandidateUrl, root: &CandidateUrl) -> bool {
    if !candidate.fragment.is_empty() {
        return false;
    }
    if candidate.host.is_empty() {
        return true;
    }
    domains_match(&root.host, &candidate.host)
}

// Overwrites the candidate's scheme and host with the root's
//
// Only safe for candidates that passed should_follow: a foreign host would
// otherwise be silently turned into a root URL.
pub fn canonicalize(candidate: &mut CandidateUrl, root: &CandidateUrl) {
    candidate.scheme = root.scheme.clone();
    candidate.host = root.host.clone();
}

pub fn domains_match(a: &str, b: &str) -> bool {
    without_www(a) == without_www(b)
}

// Strips a leading "www" plus the byte after it
//
// Known quirk: the fourth byte is not checked to be a '.', so
// "wwwsite.com" becomes "site.com" and "www" alone becomes "".
// Works on bytes so a multi-byte character after "www" is cut in half
// rather than turning the whole host into "".
pub fn without_www(host: &str) -> &[u8] {
    let bytes = host.as_bytes();
    if bytes.starts_with(b"www") {
        bytes.get(4..).unwrap_or_default()
    } else {
        bytes
    }
}
