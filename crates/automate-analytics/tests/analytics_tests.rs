use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use automate_analytics::{
    Analytics, AnalyticsDataProvider, Hit, InMemoryCollector, VersionTracker, VersionTransition, DEFAULT_ENDPOINT,
};

struct StaticProvider {
    root: PathBuf,
    version: String,
    enabled: AtomicBool,
}

impl StaticProvider {
    fn new(root: &Path, version: &str) -> Arc<Self> {
        Arc::new(Self {
            root: root.to_path_buf(),
            version: version.to_string(),
            enabled: AtomicBool::new(true),
        })
    }
}

impl AnalyticsDataProvider for StaticProvider {
    fn root_dir(&self) -> PathBuf {
        self.root.clone()
    }
    fn application_name(&self) -> String {
        "Jenkins".into()
    }
    fn application_version(&self) -> String {
        "2.440".into()
    }
    fn plugin_name(&self) -> String {
        "browserstack-integration".into()
    }
    fn plugin_version(&self) -> String {
        self.version.clone()
    }
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

fn reporter(root: &Path, version: &str) -> (Analytics, Arc<InMemoryCollector>, Arc<StaticProvider>) {
    let provider = StaticProvider::new(root, version);
    let collector = Arc::new(InMemoryCollector::new());
    let analytics = Analytics::new(provider.clone(), Some(collector.clone()));
    (analytics, collector, provider)
}

fn seed(root: &Path, version: &str) {
    VersionTracker::new(root).reconcile(version).unwrap();
}

#[test]
fn test_first_install_emits_install() {
    let dir = tempfile::tempdir().unwrap();
    let (_a, collector, _) = reporter(dir.path(), "2.0");

    let state = VersionTracker::new(dir.path()).load().unwrap().unwrap();
    assert_eq!(state.plugin_version, "2.0");
    let sent = collector.envelopes();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].hit, Hit::event("install", "install"));
    assert_eq!(&sent[0].globals.client_id, &state.client_id);
}

#[test]
fn test_upgrade_emits_update() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "1.0");
    let (_a, collector, _) = reporter(dir.path(), "2.0");

    let state = VersionTracker::new(dir.path()).load().unwrap().unwrap();
    assert_eq!(state.plugin_version, "2.0");
    let sent = collector.envelopes();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].hit, Hit::event("install", "update"));
}

#[test]
fn test_same_version_emits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "2.0");
    let before = std::fs::read(VersionTracker::new(dir.path()).path()).unwrap();
    let (a, collector, _) = reporter(dir.path(), "2.0");

    assert!(collector.is_empty());
    assert_eq!(std::fs::read(VersionTracker::new(dir.path()).path()).unwrap(), before);
    assert_eq!(a.track_install(), Some(VersionTransition::SameVersion));
    assert!(collector.is_empty());
}

#[test]
fn test_persistence_failure_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    // root_dir is a file, so the state file can never be created
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let (a, collector, _) = reporter(&blocker, "2.0");

    assert!(collector.is_empty());
    assert_eq!(a.client_id().as_str(), automate_analytics::DEFAULT_CLIENT_ID);
    assert!(a.is_enabled());
    assert_eq!(a.track_install(), None);

    a.track_report_view();
    assert_eq!(collector.len(), 1);
}

#[test]
fn test_build_run_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "2.0");
    let (a, collector, _) = reporter(dir.path(), "2.0");

    a.track_build_run(true, true, false);
    a.track_build_run(false, false, true);
    let sent = collector.envelopes();
    assert_eq!(
        sent[0].hit,
        Hit::event("withLocal", "buildRun")
            .with_dimension(1, "withLocalPath")
            .with_dimension(4, "withoutLocalOptions")
    );
    assert_eq!(
        sent[1].hit,
        Hit::event("withoutLocal", "buildRun")
            .with_dimension(2, "withoutLocalPath")
            .with_dimension(3, "withLocalOptions")
    );
}

#[test]
fn test_report_and_iframe_events() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), "2.0");
    let (a, collector, _) = reporter(dir.path(), "2.0");

    a.track_report_view();
    a.track_reporting_event(true);
    a.track_reporting_event(false);
    a.track_iframe_request();
    a.track_iframe_load(420);

    let hits: Vec<Hit> = collector.envelopes().into_iter().map(|e| e.hit).collect();
    assert_eq!(
        hits,
        vec![
            Hit::event("report", "separateTab"),
            Hit::event("reporting", "reportEmbedded"),
            Hit::event("reporting", "reportNotEmbedded"),
            Hit::event("iframeRequested", "iframe"),
            Hit::timing("iframeLoadTimeMs", "iframe", 420),
        ]
    );
    for env in collector.envelopes() {
        assert_eq!(env.globals.application_name, "Jenkins");
        assert_eq!(env.globals.application_version, "2.440");
        assert_eq!(env.globals.plugin_name, "browserstack-integration");
        assert_eq!(env.globals.plugin_version, "2.0");
    }
}

#[test]
fn test_disabled_flag_blocks_everything() {
    let dir = tempfile::tempdir().unwrap();
    let (a, collector, _) = reporter(dir.path(), "2.0");
    assert_eq!(collector.len(), 1);

    a.set_enabled(false);
    a.track_build_run(true, true, true);
    a.track_report_view();
    a.track_reporting_event(true);
    a.track_iframe_request();
    a.track_iframe_load(1);
    assert_eq!(collector.len(), 1);

    a.set_enabled(true);
    a.track_report_view();
    assert_eq!(collector.len(), 2);
}

#[test]
fn test_provider_disabled_blocks_everything() {
    let dir = tempfile::tempdir().unwrap();
    let provider = StaticProvider::new(dir.path(), "2.0");
    provider.enabled.store(false, Ordering::Relaxed);
    let collector = Arc::new(InMemoryCollector::new());
    let a = Analytics::new(provider.clone(), Some(collector.clone()));

    a.track_report_view();
    a.track_iframe_load(10);
    assert!(collector.is_empty());
    // state is still written even when nothing is sent
    assert!(VersionTracker::new(dir.path()).load().unwrap().is_some());

    provider.enabled.store(true, Ordering::Relaxed);
    a.track_report_view();
    assert_eq!(collector.len(), 1);
}

#[test]
fn test_missing_properties_disables_reporter() {
    let dir = tempfile::tempdir().unwrap();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let provider = StaticProvider::new(dir.path(), "2.0");
    let a = Analytics::from_properties(
        provider,
        &dir.path().join("plugin.properties"),
        DEFAULT_ENDPOINT,
        rt.handle().clone(),
    );
    assert!(!a.is_enabled());
    assert!(!a.has_collector());
    // re-enabling cannot bring a collector back
    a.set_enabled(true);
    a.track_report_view();
    assert!(!a.has_collector());
}

#[test]
fn test_properties_without_key_keeps_flag() {
    let dir = tempfile::tempdir().unwrap();
    let props = dir.path().join("plugin.properties");
    std::fs::write(&props, "unrelated=1\n").unwrap();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let a = Analytics::from_properties(
        StaticProvider::new(dir.path(), "2.0"),
        &props,
        DEFAULT_ENDPOINT,
        rt.handle().clone(),
    );
    assert!(a.is_enabled());
    assert!(!a.has_collector());
    a.track_iframe_request();
}

#[test]
fn test_properties_with_key_builds_collector() {
    let dir = tempfile::tempdir().unwrap();
    let props = dir.path().join("plugin.properties");
    std::fs::write(&props, "google.analytics.tracking.id=UA-1234-5\n").unwrap();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let a = Analytics::from_properties(
        StaticProvider::new(dir.path(), "2.0"),
        &props,
        "http://127.0.0.1:9/collect",
        rt.handle().clone(),
    );
    assert!(a.is_enabled());
    assert!(a.has_collector());
}

#[test]
fn test_explicit_none_collector_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let a = Analytics::new(StaticProvider::new(dir.path(), "2.0"), None);
    assert!(a.is_enabled());
    assert!(!a.has_collector());
    // the install transition is still recorded
    assert!(VersionTracker::new(dir.path()).load().unwrap().is_some());
}
