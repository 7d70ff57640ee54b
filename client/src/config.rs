//! Configuration for the API client.

use std::{env, path::PathBuf};

use url::Url;

use crate::error::ApiError;

/// API base URL, overridable at build time through `YOUTH_COUNCIL_API_BASE`.
pub const DEFAULT_API_BASE: &str = match option_env!("YOUTH_COUNCIL_API_BASE") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Uploaded assets are served under this path of the API host.
const DEFAULT_ASSET_SUFFIX: &str = "uploads";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: String,
    asset_base: String,
    token_file: PathBuf,
}

impl ClientConfig {
    /// Build a config for `api_base`, with assets under `<api_base>/uploads`
    /// and the default token file location.
    pub fn new(api_base: &str) -> Result<Self, ApiError> {
        let api_base = normalize_base(api_base)?;
        let asset_base = format!("{api_base}/{DEFAULT_ASSET_SUFFIX}");
        Ok(Self {
            api_base,
            asset_base,
            token_file: default_token_file(),
        })
    }

    /// Read `YOUTH_COUNCIL_API_BASE`, `YOUTH_COUNCIL_ASSET_BASE` and
    /// `YOUTH_COUNCIL_TOKEN_FILE`, falling back to defaults for unset or
    /// blank values.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_base = env_value("YOUTH_COUNCIL_API_BASE");
        let mut config = Self::new(api_base.as_deref().unwrap_or(DEFAULT_API_BASE))?;
        if let Some(asset_base) = env_value("YOUTH_COUNCIL_ASSET_BASE") {
            config = config.with_asset_base(&asset_base)?;
        }
        if let Some(token_file) = env_value("YOUTH_COUNCIL_TOKEN_FILE") {
            config = config.with_token_file(PathBuf::from(token_file));
        }
        Ok(config)
    }

    pub fn with_asset_base(mut self, asset_base: &str) -> Result<Self, ApiError> {
        self.asset_base = normalize_base(asset_base)?;
        Ok(self)
    }

    pub fn with_token_file(mut self, token_file: PathBuf) -> Self {
        self.token_file = token_file;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn asset_base(&self) -> &str {
        &self.asset_base
    }

    pub fn token_file(&self) -> &PathBuf {
        &self.token_file
    }

    /// Absolute URL for an API path such as `/members/7`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Display URL for a server-relative asset path. Absolute URLs pass
    /// through untouched.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        // Remove leading slash if present
        let path = path.trim_start_matches('/');
        let suffix = format!("{DEFAULT_ASSET_SUFFIX}/");
        let path = if self.asset_base.ends_with(DEFAULT_ASSET_SUFFIX) {
            path.strip_prefix(&suffix).unwrap_or(path)
        } else {
            path
        };
        format!("{}/{}", self.asset_base, path)
    }
}

fn normalize_base(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("invalid base URL `{raw}`: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => {},
        other => {
            return Err(ApiError::Config(format!(
                "base URL `{raw}` must use http or https, got `{other}`"
            )))
        },
    }
    Ok(trimmed.to_string())
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn default_token_file() -> PathBuf {
    token_file_under(dirs::config_dir())
}

/// `<config dir>/youth-council/token`, or a file in the working directory
/// when the platform has no config dir.
fn token_file_under(config_dir: Option<PathBuf>) -> PathBuf {
    match config_dir {
        Some(dir) => dir.join("youth-council").join("token"),
        None => PathBuf::from(".youth-council-token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("https://api.example.org/").expect("config");
        assert_eq!(config.endpoint("/members/7"), "https://api.example.org/members/7");
        assert_eq!(config.endpoint("reports"), "https://api.example.org/reports");
    }

    #[test]
    fn asset_url_resolves_relative_paths() {
        let config = ClientConfig::new("https://api.example.org").expect("config");
        assert_eq!(config.asset_base(), "https://api.example.org/uploads");
        assert_eq!(config.asset_url("abc.jpg"), "https://api.example.org/uploads/abc.jpg");
        assert_eq!(
            config.asset_url("uploads/report.pdf"),
            "https://api.example.org/uploads/report.pdf"
        );
        assert_eq!(
            config.asset_url("https://cdn.example.org/x.png"),
            "https://cdn.example.org/x.png"
        );
    }

    #[test]
    fn custom_asset_base_keeps_path_as_is() {
        let config = ClientConfig::new("http://localhost:8000")
            .and_then(|config| config.with_asset_base("https://cdn.example.org/static/"))
            .expect("config");
        assert_eq!(config.asset_url("/a/b.png"), "https://cdn.example.org/static/a/b.png");
    }

    #[test]
    fn token_file_lives_under_config_dir() {
        let path = token_file_under(Some(PathBuf::from("/home/ana/.config")));
        assert_eq!(path, PathBuf::from("/home/ana/.config/youth-council/token"));
    }

    #[test]
    fn token_file_falls_back_to_working_dir() {
        assert_eq!(token_file_under(None), PathBuf::from(".youth-council-token"));
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(ClientConfig::new("ftp://example.org"), Err(ApiError::Config(_))));
        assert!(ClientConfig::new("not a url").is_err());
    }
}
