use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::Source;

const DEFAULT_CONFIG_FILE: &str = "seimei.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub scorer_url: String,
    pub request_timeout_secs: Option<u64>,
    pub source: Source,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scorer_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: None,
            source: Source::Enamae,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// `None` (or zero seconds) means wait indefinitely.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    scorer_url: Option<String>,
    request_timeout_secs: Option<u64>,
    source: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicit `path` must exist; the default `seimei.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    settings.scorer_url = normalize_scorer_url(&settings.scorer_url);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.scorer_url {
        settings.scorer_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    if let Some(v) = file_cfg.source {
        settings.source = v.parse()?;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = var("SEIMEI_SCORER_URL") {
        settings.scorer_url = v;
    }
    if let Some(v) = var("APP__SCORER_URL") {
        settings.scorer_url = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS is not a number: '{v}'"))?;
        settings.request_timeout_secs = Some(secs);
    }

    if let Some(v) = var("APP__SOURCE") {
        settings.source = v.parse()?;
    }

    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(())
}

pub fn normalize_scorer_url(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches('/');

    if raw.is_empty() {
        return Settings::default().scorer_url;
    }

    if raw.contains("://") {
        return raw.to_string();
    }

    format!("http://{raw}")
}
