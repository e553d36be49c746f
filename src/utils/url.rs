//! URL utilities for recognizing and canonicalizing Instagram post URLs

use url::Url;

/// Path segments that identify a post URL (as opposed to a profile or
/// any other page on the site).
const POST_PATH_SEGMENTS: &[&str] = &["p", "reel", "reels", "tv", "stories", "share"];

/// Hosts accepted as Instagram, including the short-domain form
const ACCEPTED_HOSTS: &[&str] = &[
    "instagram.com",
    "www.instagram.com",
    "instagr.am",
    "www.instagr.am",
];

/// Check if URL points at an Instagram post, reel, story or share link.
///
/// This is the caller-facing validation run before any provider is
/// contacted. Both `/reel/<code>/` and `/<username>/reel/<code>/` forms
/// are accepted.
pub fn is_post_url(url: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let host = match parsed.host_str() {
        Some(host) => host.to_lowercase(),
        None => return false,
    };
    if !ACCEPTED_HOSTS.contains(&host.as_str()) {
        return false;
    }

    let segments: Vec<&str> = match parsed.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).collect(),
        None => return false,
    };

    // /reel/<code>/ or /<username>/reel/<code>/
    match segments.as_slice() {
        [kind, _rest @ ..] if POST_PATH_SEGMENTS.contains(kind) => segments.len() >= 2,
        [_username, kind, _rest @ ..] if POST_PATH_SEGMENTS.contains(kind) => true,
        _ => false,
    }
}

/// Canonicalize an Instagram URL before handing it to a provider.
///
/// Strips the query string when the URL matches the post-path allowlist
/// (share-tracking parameters are not part of a post's identity) and
/// inserts the `www.` subdomain when missing, since some providers
/// reject bare-domain URLs. This is a best-effort rewrite, not a
/// validator: input that doesn't look like a post URL passes through
/// unchanged.
pub fn normalize(url: &str) -> String {
    let mut out = url.to_string();

    if is_post_url(&out) {
        if let Some(pos) = out.find('?') {
            out.truncate(pos);
        }
    }

    for scheme in ["https://", "http://"] {
        if let Some(rest) = out.strip_prefix(scheme) {
            if rest.starts_with("instagram.com") {
                out = format!("{}www.{}", scheme, rest);
            }
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_post_url() {
        assert!(is_post_url("https://www.instagram.com/reel/DS8xsilk4sz/"));
        assert!(is_post_url("https://www.instagram.com/p/DEF456/"));
        assert!(is_post_url("https://instagram.com/reels/GHI789/"));
        assert!(is_post_url("https://www.instagram.com/tv/JKL012/"));
        assert!(is_post_url("https://www.instagram.com/stories/someuser/123456/"));
        assert!(is_post_url("https://www.instagram.com/share/xyz/"));

        // Username-prefixed form
        assert!(is_post_url("https://www.instagram.com/someuser/reel/B58TfHTnY2u/"));

        // Short-domain links resolve to the same posts
        assert!(is_post_url("https://instagr.am/reel/DS8xsilk4sz/"));
        assert!(is_post_url("https://www.instagr.am/p/DEF456/"));

        // Query parameters don't affect recognition
        assert!(is_post_url("https://www.instagram.com/reel/ABC123/?igsh=xxx"));
    }

    #[test]
    fn test_is_post_url_rejections() {
        // Profile pages are not posts
        assert!(!is_post_url("https://www.instagram.com/cristiano/"));
        // Bare post-type segment without a shortcode
        assert!(!is_post_url("https://www.instagram.com/reel/"));
        assert!(!is_post_url("https://www.instagram.com/"));
        // Wrong host
        assert!(!is_post_url("https://www.youtube.com/watch?v=abc"));
        assert!(!is_post_url("https://example.com/reel/ABC123/"));
        // Not a URL at all
        assert!(!is_post_url("not-a-url"));
        assert!(!is_post_url(""));
        // Wrong scheme
        assert!(!is_post_url("ftp://www.instagram.com/reel/ABC123/"));
    }

    #[test]
    fn test_normalize_strips_query() {
        assert_eq!(
            normalize("https://www.instagram.com/reel/ABC123/?igsh=MzRlODBiNWFlZA=="),
            "https://www.instagram.com/reel/ABC123/"
        );
        assert_eq!(
            normalize("https://www.instagram.com/p/DEF456/?utm_source=ig_web"),
            "https://www.instagram.com/p/DEF456/"
        );
    }

    #[test]
    fn test_normalize_inserts_www() {
        assert_eq!(
            normalize("https://instagram.com/reel/ABC123/"),
            "https://www.instagram.com/reel/ABC123/"
        );
        assert_eq!(
            normalize("http://instagram.com/p/DEF456/"),
            "http://www.instagram.com/p/DEF456/"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let urls = [
            "https://instagram.com/reel/ABC123/?igsh=xxx",
            "https://www.instagram.com/p/DEF456/",
            "https://www.instagram.com/someuser/reel/B58TfHTnY2u/?utm_source=x",
        ];
        for url in urls {
            let once = normalize(url);
            assert_eq!(normalize(&once), once, "normalize not idempotent for {}", url);
        }
    }

    #[test]
    fn test_normalize_leaves_non_posts_alone() {
        // Not a post URL: query survives, only best-effort www insertion applies
        assert_eq!(
            normalize("https://www.instagram.com/cristiano/?hl=en"),
            "https://www.instagram.com/cristiano/?hl=en"
        );
        // Malformed input passes through untouched
        assert_eq!(normalize("not-a-url"), "not-a-url");
    }
}
