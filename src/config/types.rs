use serde::Deserialize;

/// Browser user agent sent with every request
///
/// Many storefronts reject obvious bot agents outright, so the default mimics
/// a desktop Chrome build.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Conventional sitemap locations, tried in order
pub const DEFAULT_SITEMAP_PATHS: &[&str] =
    &["/sitemap.xml", "/sitemap_index.xml", "/sitemap-index.xml"];

/// Phrases whose presence marks a site as commerce-oriented
pub const DEFAULT_COMMERCE_INDICATORS: &[&str] = &[
    "add to cart",
    "buy now",
    "product",
    "price",
    "shipping",
    "checkout",
];

/// Main configuration structure for Sitemap-Harvest
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Page extraction pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page extractions
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum redirect hops followed per request
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Extra attempts after a timeout, connect failure or 5xx
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Sitemap discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Scheme used to build candidate URLs ("https" or "http")
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Paths tried before falling back to robots.txt
    #[serde(rename = "sitemap-paths", default = "default_sitemap_paths")]
    pub sitemap_paths: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            sitemap_paths: default_sitemap_paths(),
        }
    }
}

/// Site classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Lower-case phrases that mark a site as commerce
    #[serde(rename = "commerce-indicators", default = "default_commerce_indicators")]
    pub commerce_indicators: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            commerce_indicators: default_commerce_indicators(),
        }
    }
}

/// HTTP front end configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the form server listens on
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_max_workers() -> u32 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_sitemap_paths() -> Vec<String> {
    DEFAULT_SITEMAP_PATHS.iter().map(|p| p.to_string()).collect()
}

fn default_commerce_indicators() -> Vec<String> {
    DEFAULT_COMMERCE_INDICATORS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}
