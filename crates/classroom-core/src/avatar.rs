//! Avatar URL resolution shared by the feed, roster and profile views.

use crate::config::ApiConfig;

/// Resolves raw `image` fields from the backend into absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarResolver {
    origin: String,
    default_url: String,
}

impl AvatarResolver {
    pub fn new(origin: impl Into<String>, default_url: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            default_url: default_url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.origin(), config.default_avatar_url.clone())
    }

    /// Absolute URLs pass through unchanged, relative paths are joined to the
    /// origin, and absent or blank values fall back to the default avatar.
    ///
    /// ```
    /// use classroom_core::avatar::AvatarResolver;
    ///
    /// let resolver = AvatarResolver::new("https://example.org", "https://example.org/default.png");
    /// assert_eq!(resolver.resolve(Some("/uploads/a.png")), "https://example.org/uploads/a.png");
    /// assert_eq!(resolver.resolve(None), "https://example.org/default.png");
    /// ```
    pub fn resolve(&self, raw: Option<&str>) -> String {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) if is_absolute_url(value) => value.to_string(),
            Some(value) if value.starts_with('/') => format!("{}{}", self.origin, value),
            Some(value) => format!("{}/{}", self.origin, value),
            None => self.default_url.clone(),
        }
    }
}

fn is_absolute_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> AvatarResolver {
        AvatarResolver::new("https://cis.kku.ac.th/", "https://img.example/default.png")
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let url = "https://cdn.example/avatars/u1.png";
        assert_eq!(resolver().resolve(Some(url)), url);
        assert_eq!(resolver().resolve(Some("HTTP://legacy/u.png")), "HTTP://legacy/u.png");
    }

    #[test]
    fn test_relative_path_gets_origin() {
        assert_eq!(
            resolver().resolve(Some("/uploads/u1.png")),
            "https://cis.kku.ac.th/uploads/u1.png"
        );
        assert_eq!(
            resolver().resolve(Some("uploads/u1.png")),
            "https://cis.kku.ac.th/uploads/u1.png"
        );
    }

    #[test]
    fn test_missing_or_blank_uses_default() {
        assert_eq!(resolver().resolve(None), "https://img.example/default.png");
        assert_eq!(resolver().resolve(Some("")), "https://img.example/default.png");
        assert_eq!(resolver().resolve(Some("   ")), "https://img.example/default.png");
    }
}
