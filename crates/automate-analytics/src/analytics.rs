use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use automate_core::ClientId;
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::collector::{Collector, HttpCollector};
use crate::hit::{Envelope, GlobalProperties, Hit};
use crate::properties::load_tracking_id;
use crate::provider::AnalyticsDataProvider;
use crate::version::{VersionTracker, VersionTransition};

pub const DEFAULT_CLIENT_ID: &str = "unknown-client";

/// Best-effort usage reporter.
///
/// Nothing here returns an error to the caller: persistence problems are
/// logged and the affected event is skipped, and delivery is fire-and-forget.
pub struct Analytics {
    provider: Arc<dyn AnalyticsDataProvider>,
    collector: Option<Arc<dyn Collector>>,
    versions: VersionTracker,
    client_id: ClientId,
    enabled: AtomicBool,
}

impl Analytics {
    /// Builds a reporter around an explicit collector (or none) and records
    /// the install/update transition for this startup.
    pub fn new(provider: Arc<dyn AnalyticsDataProvider>, collector: Option<Arc<dyn Collector>>) -> Self {
        Self::build(provider, collector, true)
    }

    /// Reads the tracking id from a plugin properties file and reports through
    /// an [`HttpCollector`] on `runtime`.
    ///
    /// A missing key leaves the reporter without a collector; an unreadable
    /// file also turns the enable flag off. Either way it stays that way for
    /// the life of the handle.
    pub fn from_properties(
        provider: Arc<dyn AnalyticsDataProvider>,
        properties_path: &Path,
        endpoint: &str,
        runtime: Handle,
    ) -> Arc<Self> {
        let (collector, enabled): (Option<Arc<dyn Collector>>, bool) = match load_tracking_id(properties_path) {
            Ok(Some(id)) => (Some(Arc::new(HttpCollector::new(id, endpoint, runtime)) as Arc<dyn Collector>), true),
            Ok(None) => {
                warn!("no tracking id in {}; analytics disabled", properties_path.display());
                (None, true)
            }
            Err(e) => {
                warn!("cannot read {}: {e}; analytics disabled", properties_path.display());
                (None, false)
            }
        };
        Arc::new(Self::build(provider, collector, enabled))
    }

    fn build(provider: Arc<dyn AnalyticsDataProvider>, collector: Option<Arc<dyn Collector>>, enabled: bool) -> Self {
        let versions = VersionTracker::new(&provider.root_dir());
        let transition = reconcile_logged(&versions, &provider.plugin_version());
        let client_id = match versions.client_id() {
            Ok(Some(id)) => id,
            Ok(None) => ClientId::from_str(DEFAULT_CLIENT_ID),
            Err(e) => {
                warn!("failed to read analytics client id: {e}");
                ClientId::from_str(DEFAULT_CLIENT_ID)
            }
        };

        let analytics = Self {
            provider,
            collector,
            versions,
            client_id,
            enabled: AtomicBool::new(enabled),
        };
        if let Some(t) = &transition {
            analytics.post_transition(t);
        }
        analytics
    }

    /// Re-checks the stored plugin version and reports an install or update.
    /// Returns `None` when the state file could not be read or written.
    pub fn track_install(&self) -> Option<VersionTransition> {
        let transition = reconcile_logged(&self.versions, &self.provider.plugin_version())?;
        self.post_transition(&transition);
        Some(transition)
    }

    pub fn track_build_run(&self, local_enabled: bool, local_path_set: bool, local_options_set: bool) {
        let category = if local_enabled { "withLocal" } else { "withoutLocal" };
        let mut hit = Hit::event(category, "buildRun");
        hit = if local_path_set {
            hit.with_dimension(1, "withLocalPath")
        } else {
            hit.with_dimension(2, "withoutLocalPath")
        };
        hit = if local_options_set {
            hit.with_dimension(3, "withLocalOptions")
        } else {
            hit.with_dimension(4, "withoutLocalOptions")
        };
        self.post(hit);
    }

    pub fn track_report_view(&self) {
        self.post(Hit::event("report", "separateTab"));
    }

    pub fn track_reporting_event(&self, report_embedded: bool) {
        let action = if report_embedded { "reportEmbedded" } else { "reportNotEmbedded" };
        self.post(Hit::event("reporting", action));
    }

    pub fn track_iframe_request(&self) {
        self.post(Hit::event("iframeRequested", "iframe"));
    }

    pub fn track_iframe_load(&self, load_time_ms: u64) {
        self.post(Hit::timing("iframeLoadTimeMs", "iframe", load_time_ms));
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// False when no tracking id could be configured; nothing is ever sent then.
    pub fn has_collector(&self) -> bool {
        self.collector.is_some()
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    fn globals(&self) -> GlobalProperties {
        GlobalProperties {
            client_id: self.client_id.clone(),
            application_name: self.provider.application_name(),
            application_version: self.provider.application_version(),
            plugin_name: self.provider.plugin_name(),
            plugin_version: self.provider.plugin_version(),
        }
    }

    fn post_transition(&self, transition: &VersionTransition) {
        match transition {
            VersionTransition::NoPriorState => self.post(Hit::event("install", "install")),
            VersionTransition::VersionChanged { previous } => {
                info!("plugin upgraded from {previous} to {}", self.provider.plugin_version());
                self.post(Hit::event("install", "update"));
            }
            VersionTransition::SameVersion => {}
        }
    }

    fn post(&self, hit: Hit) {
        if !self.is_enabled() || !self.provider.is_enabled() {
            return;
        }
        let Some(collector) = &self.collector else {
            return;
        };
        collector.post_async(Envelope {
            hit,
            globals: self.globals(),
        });
    }
}

fn reconcile_logged(versions: &VersionTracker, current_version: &str) -> Option<VersionTransition> {
    match versions.reconcile(current_version) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!("failed to track install: {e}");
            None
        }
    }
}
