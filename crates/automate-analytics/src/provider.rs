use std::path::PathBuf;

/// Host-side facts the reporter needs: where to keep state, what is running,
/// and whether the host currently allows reporting.
pub trait AnalyticsDataProvider: Send + Sync {
    fn root_dir(&self) -> PathBuf;
    fn application_name(&self) -> String;
    fn application_version(&self) -> String;
    fn plugin_name(&self) -> String;
    fn plugin_version(&self) -> String;
    fn is_enabled(&self) -> bool;
}
