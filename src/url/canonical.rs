use crate::UrlError;
use std::fmt;
use url::Url;

/// A canonical absolute URL: scheme, host, and path, with the query string
/// and fragment discarded.
///
/// Two URLs refer to the same page iff their canonical forms are equal, so
/// this type is the unit of deduplication for a crawl. The host comparison
/// includes an explicit port when one is present, which matters for mirrors
/// of sites served on non-default ports.
///
/// # Examples
///
/// ```
/// use webmirror::CanonicalUrl;
///
/// let url = CanonicalUrl::parse("http://example.com/page?x=1#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    /// Parses an absolute URL string into its canonical form
    ///
    /// # Arguments
    ///
    /// * `input` - The URL string to parse
    ///
    /// # Returns
    ///
    /// * `Ok(CanonicalUrl)` - Parsed and canonicalized URL
    /// * `Err(UrlError)` - The input is not a parseable HTTP(S) URL
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let url = Url::parse(input).map_err(|e| UrlError::Parse(e.to_string()))?;
        canonicalize(url)
    }

    /// Resolves an href (absolute or relative) against this URL
    ///
    /// Resolution follows standard URL join rules; the result is
    /// canonicalized like any other URL. Hrefs with non-HTTP(S) schemes
    /// (`mailto:`, `javascript:`, ...) are rejected rather than resolved.
    ///
    /// # Arguments
    ///
    /// * `href` - The href to resolve against this URL
    ///
    /// # Returns
    ///
    /// * `Ok(CanonicalUrl)` - The resolved canonical URL
    /// * `Err(UrlError)` - The href cannot be parsed or resolved
    pub fn resolve(&self, href: &str) -> Result<Self, UrlError> {
        let joined = self
            .0
            .join(href)
            .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
        canonicalize(joined)
    }

    /// Returns the canonical string form (scheme://host[:port]/path)
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host portion of the URL
    pub fn host_str(&self) -> &str {
        // Canonicalization guarantees a host is present.
        self.0.host_str().unwrap_or_default()
    }

    /// Returns the path portion of the URL
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Returns true if `other` shares this URL's host and port
    pub fn same_host(&self, other: &CanonicalUrl) -> bool {
        self.0.host_str() == other.0.host_str() && self.0.port() == other.0.port()
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strips the query and fragment and validates scheme and host
fn canonicalize(mut url: Url) -> Result<CanonicalUrl, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "only HTTP and HTTPS are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(CanonicalUrl(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_query() {
        let url = CanonicalUrl::parse("http://example.com/p?x=1").unwrap();
        assert_eq!(url.as_str(), "http://example.com/p");
    }

    #[test]
    fn test_strips_fragment() {
        let url = CanonicalUrl::parse("http://example.com/p#section").unwrap();
        assert_eq!(url.as_str(), "http://example.com/p");
    }

    #[test]
    fn test_strips_query_and_fragment() {
        let url = CanonicalUrl::parse("http://example.com/p?x=1#y").unwrap();
        assert_eq!(url.as_str(), "http://example.com/p");
        assert_eq!(url.path(), "/p");
    }

    #[test]
    fn test_resolve_relative_href() {
        let base = CanonicalUrl::parse("http://example.com/index.html").unwrap();
        let resolved = base.resolve("/about.html").unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/about.html");
    }

    #[test]
    fn test_resolve_sibling_href() {
        let base = CanonicalUrl::parse("http://example.com/dir/index.html").unwrap();
        let resolved = base.resolve("other.html").unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/dir/other.html");
    }

    #[test]
    fn test_resolve_absolute_href() {
        let base = CanonicalUrl::parse("http://example.com/index.html").unwrap();
        let resolved = base.resolve("http://other.com/page.html").unwrap();
        assert_eq!(resolved.as_str(), "http://other.com/page.html");
    }

    #[test]
    fn test_resolve_strips_query_and_fragment() {
        let base = CanonicalUrl::parse("http://example.com/index.html").unwrap();
        let resolved = base.resolve("/p?x=1#y").unwrap();
        assert_eq!(resolved.path(), "/p");
    }

    #[test]
    fn test_resolve_rejects_javascript_scheme() {
        let base = CanonicalUrl::parse("http://example.com/").unwrap();
        let result = base.resolve("javascript:void(0)");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_resolve_rejects_mailto_scheme() {
        let base = CanonicalUrl::parse("http://example.com/").unwrap();
        let result = base.resolve("mailto:user@example.com");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_parse_rejects_ftp_scheme() {
        let result = CanonicalUrl::parse("ftp://example.com/file");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = CanonicalUrl::parse("not a url");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_same_host() {
        let a = CanonicalUrl::parse("http://example.com/a").unwrap();
        let b = CanonicalUrl::parse("http://example.com/b").unwrap();
        let c = CanonicalUrl::parse("http://other.com/a").unwrap();
        assert!(a.same_host(&b));
        assert!(!a.same_host(&c));
    }

    #[test]
    fn test_same_host_distinguishes_ports() {
        let a = CanonicalUrl::parse("http://example.com:8080/a").unwrap();
        let b = CanonicalUrl::parse("http://example.com:9090/a").unwrap();
        assert!(!a.same_host(&b));
    }

    #[test]
    fn test_equality_is_canonical() {
        let a = CanonicalUrl::parse("http://example.com/p?x=1").unwrap();
        let b = CanonicalUrl::parse("http://example.com/p#frag").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dot_segments_resolved_on_join() {
        let base = CanonicalUrl::parse("http://example.com/a/b/index.html").unwrap();
        let resolved = base.resolve("../c.html").unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/a/c.html");
    }
}
