use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub service_url: String,
    pub project_id: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:3002".into(),
            project_id: None,
            request_timeout_secs: 30,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Keys read from the config file. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    service_url: Option<String>,
    project_id: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the config file at `path` when it exists, then environment.
pub fn load_settings_from(path: &Path) -> anyhow::Result<ClientSettings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file_cfg) => apply_file_values(&mut settings, file_cfg),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config: file ignored, cannot parse");
            }
        }
    }

    apply_env_overrides(&mut settings, lookup);
    settings.service_url = normalize_service_url(&settings.service_url)?;
    Ok(settings)
}

fn apply_file_values(settings: &mut ClientSettings, file_cfg: FileConfig) {
    if let Some(v) = file_cfg.service_url {
        settings.service_url = v;
    }
    if let Some(v) = file_cfg.project_id {
        settings.project_id = Some(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
}

pub fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = lookup("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = lookup("APP__PROJECT_ID") {
        settings.project_id = Some(v);
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

pub fn normalize_service_url(raw_service_url: &str) -> anyhow::Result<String> {
    let raw_service_url = raw_service_url.trim();
    if raw_service_url.is_empty() {
        return Ok(ClientSettings::default().service_url);
    }

    let parsed = Url::parse(raw_service_url)
        .with_context(|| format!("invalid service url {raw_service_url}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("service url must use http or https: {raw_service_url}");
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
