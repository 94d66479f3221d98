use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use automate_analytics::{Analytics, AnalyticsDataProvider, Collector, Envelope, InMemoryCollector, STATE_FILE};
use tempfile::TempDir;
use tokio::runtime::Handle;

use crate::config::{Config, ConfigDataProvider};

/// Reporter handle for one `track` invocation.
pub struct Reporter {
    pub analytics: Arc<Analytics>,
    recorder: Option<Arc<InMemoryCollector>>,
    // keeps the dry-run state copy alive
    _scratch: Option<TempDir>,
}

impl Reporter {
    /// Real runs report through the configured collector. Dry runs record
    /// hits in memory and reconcile a scratch copy of the state file, so the
    /// stored version is never touched.
    pub fn open(cfg: &Config, repo_root: &Path, dry_run: bool, runtime: Handle) -> Result<Self> {
        let provider = ConfigDataProvider::new(cfg);
        if !dry_run {
            let props = repo_root.join(&cfg.analytics.properties_path);
            return Ok(Self {
                analytics: Analytics::from_properties(Arc::new(provider), &props, cfg.endpoint(), runtime),
                recorder: None,
                _scratch: None,
            });
        }

        let scratch = tempfile::tempdir().context("create dry-run state dir")?;
        let state = provider.root_dir().join(STATE_FILE);
        if state.exists() {
            std::fs::copy(&state, scratch.path().join(STATE_FILE))
                .with_context(|| format!("copy {}", state.display()))?;
        }
        let provider = provider.with_root_dir(scratch.path().to_path_buf());
        let recorder = Arc::new(InMemoryCollector::new());
        let analytics = Analytics::new(Arc::new(provider), Some(recorder.clone() as Arc<dyn Collector>));
        Ok(Self {
            analytics: Arc::new(analytics),
            recorder: Some(recorder),
            _scratch: Some(scratch),
        })
    }

    /// Hits captured by a dry run; empty for real runs.
    pub fn recorded(&self) -> Vec<Envelope> {
        self.recorder.as_ref().map(|r| r.envelopes()).unwrap_or_default()
    }
}
