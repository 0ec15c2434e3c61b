#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings resolved once at startup.
///
/// Store-level settings (logo, pixel IDs) are not here: they come from the
/// remote API and are cached separately. `default_fb_pixel_id` is only the
/// fallback used when the store has not configured its own pixel.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub media_base_url: String,
    pub site_url: Option<String>,
    pub default_fb_pixel_id: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
