use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Config;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub http: Option<HttpConfig>,
    pub pipeline: Option<PipelineConfig>,
    pub request: Option<RequestConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub max_concurrent_fetches: Option<usize>,
}

/// Defaults for the per-run request fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub listing_url: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub required_count: Option<i64>,
    pub threshold: Option<f64>,
}

/// Platform config directory path: `<config_dir>/resumerank/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("resumerank").join("config.toml"))
}

/// Load config by cascading CWD `.resumerank.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".resumerank.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_http = base.http.unwrap_or_default();
    let overlay_http = overlay.http.unwrap_or_default();
    let base_pipeline = base.pipeline.unwrap_or_default();
    let overlay_pipeline = overlay.pipeline.unwrap_or_default();
    let base_request = base.request.unwrap_or_default();
    let overlay_request = overlay.request.unwrap_or_default();

    ConfigFile {
        http: Some(HttpConfig {
            timeout_secs: overlay_http.timeout_secs.or(base_http.timeout_secs),
            user_agent: overlay_http.user_agent.or(base_http.user_agent),
        }),
        pipeline: Some(PipelineConfig {
            max_concurrent_fetches: overlay_pipeline
                .max_concurrent_fetches
                .or(base_pipeline.max_concurrent_fetches),
        }),
        request: Some(RequestConfig {
            listing_url: overlay_request.listing_url.or(base_request.listing_url),
            keywords: overlay_request.keywords.or(base_request.keywords),
            required_count: overlay_request
                .required_count
                .or(base_request.required_count),
            threshold: overlay_request.threshold.or(base_request.threshold),
        }),
    }
}

impl ConfigFile {
    /// Overwrite the fields of `config` that this file sets.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(http) = &self.http {
            if let Some(secs) = http.timeout_secs {
                config.request_timeout_secs = secs;
            }
            if let Some(ua) = &http.user_agent {
                config.user_agent = ua.clone();
            }
        }
        if let Some(n) = self
            .pipeline
            .as_ref()
            .and_then(|p| p.max_concurrent_fetches)
        {
            config.max_concurrent_fetches = n.max(1);
        }
    }
}
