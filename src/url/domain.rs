use url::Url;

/// Extracts the network location (host plus optional port) from a URL
///
/// The host is lower-cased. A port is kept only when it differs from the
/// scheme's default, which matches how a browser would display the location.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_harvest::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
