use serde::{Deserialize, Serialize};

pub const DEFAULT_ORIGIN: &str = "https://cis.kku.ac.th";
pub const DEFAULT_API_PREFIX: &str = "/api/classroom";
pub const DEFAULT_AVATAR_URL: &str = "https://www.w3schools.com/howto/img_avatar.png";
pub const DEFAULT_ROSTER_YEAR: u32 = 2565;

/// Connection settings for the classroom backend.
///
/// `api_key` is sent on every request as `x-api-key`. `auxiliary_token` is the
/// second build-time value the portal ships with; it is carried but not sent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub origin: String,
    pub api_prefix: String,
    pub api_key: Option<String>,
    pub auxiliary_token: Option<String>,
    pub default_avatar_url: String,
    pub roster_year: u32,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            api_key: None,
            auxiliary_token: None,
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
            roster_year: DEFAULT_ROSTER_YEAR,
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.origin.trim_end_matches('/')
    }

    /// Base URL all endpoint paths are joined to.
    ///
    /// ```
    /// use classroom_core::config::ApiConfig;
    ///
    /// let config = ApiConfig::default();
    /// assert_eq!(config.base_url(), "https://cis.kku.ac.th/api/classroom");
    /// ```
    pub fn base_url(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            self.origin().to_string()
        } else {
            format!("{}/{}", self.origin(), prefix)
        }
    }

    pub fn require_api_key(&self) -> crate::Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| crate::ClassroomError::config("API key is not configured"))
    }
}
