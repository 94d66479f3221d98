pub const DEFAULT_TAG: &str = "[BrowserStackAutomate]";
pub const DEBUG_ENV: &str = "BROWSERSTACK_AUTOMATE_DEBUG";

/// Settings for matcher diagnostics. Passed explicitly to every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Label prefixed to diagnostic lines.
    pub tag: String,
    pub debug: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            debug: false,
        }
    }
}

impl TrackerConfig {
    /// Default tag; debug on only when `BROWSERSTACK_AUTOMATE_DEBUG` is exactly `true`.
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV).map(|v| v == "true").unwrap_or(false);
        Self {
            debug,
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
