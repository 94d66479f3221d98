use anyhow::{Context, Result};
use automate_analytics::{AnalyticsDataProvider, DEFAULT_ENDPOINT, PLUGIN_PROPERTIES_FILE};
use automate_tracker::{TrackerConfig, DEFAULT_TAG};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub tracker: TrackerSection,
    pub analytics: AnalyticsSection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerSection {
    pub tag: String,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSection {
    pub enabled: bool,
    pub state_dir: String,
    pub properties_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub application_name: String,
    pub application_version: String,
    pub plugin_name: String,
    pub plugin_version: String,
}

impl Config {
    pub fn default_for_repo() -> Self {
        Self {
            tracker: TrackerSection {
                tag: DEFAULT_TAG.to_string(),
                debug: false,
            },
            analytics: AnalyticsSection {
                enabled: true,
                state_dir: "~/.automate".to_string(),
                properties_path: PLUGIN_PROPERTIES_FILE.to_string(),
                endpoint: None,
                application_name: "automate-ci".to_string(),
                application_version: env!("CARGO_PKG_VERSION").to_string(),
                plugin_name: env!("CARGO_PKG_NAME").to_string(),
                plugin_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default_for_repo())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).with_context(|| format!("create config dir {}", dir.display()))?;
        }
        let text = toml::to_string_pretty(self).context("serialize config")?;
        std::fs::write(path, text).with_context(|| format!("write config {}", path.display()))
    }

    /// Config-file debug switch OR'ed with `BROWSERSTACK_AUTOMATE_DEBUG`.
    pub fn tracker_config(&self) -> TrackerConfig {
        let env = TrackerConfig::from_env();
        TrackerConfig::default()
            .with_tag(self.tracker.tag.clone())
            .with_debug(self.tracker.debug || env.debug)
    }

    pub fn endpoint(&self) -> &str {
        self.analytics.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn state_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.analytics.state_dir).into_owned())
    }

    pub fn config_path(repo_root: &Path) -> PathBuf {
        repo_root.join(".automate").join("automate.toml")
    }
}

/// [`AnalyticsDataProvider`] backed by the `[analytics]` config section.
#[derive(Clone, Debug)]
pub struct ConfigDataProvider {
    section: AnalyticsSection,
    root_dir: PathBuf,
}

impl ConfigDataProvider {
    pub fn new(cfg: &Config) -> Self {
        Self {
            section: cfg.analytics.clone(),
            root_dir: cfg.state_dir(),
        }
    }

    pub fn with_root_dir(mut self, root_dir: PathBuf) -> Self {
        self.root_dir = root_dir;
        self
    }
}

impl AnalyticsDataProvider for ConfigDataProvider {
    fn root_dir(&self) -> PathBuf {
        self.root_dir.clone()
    }
    fn application_name(&self) -> String {
        self.section.application_name.clone()
    }
    fn application_version(&self) -> String {
        self.section.application_version.clone()
    }
    fn plugin_name(&self) -> String {
        self.section.plugin_name.clone()
    }
    fn plugin_version(&self) -> String {
        self.section.plugin_version.clone()
    }
    fn is_enabled(&self) -> bool {
        self.section.enabled
    }
}
