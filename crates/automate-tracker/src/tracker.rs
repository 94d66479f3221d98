use automate_core::{PendingRecords, RemoteTestRecord, SessionMatch};
use tracing::info;

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::hash::test_case_hash;
use crate::matcher::find_test_case_session;
use crate::source::RecordSource;

/// Per-build correlation state: the pending remote records plus diagnostics config.
///
/// Not synchronized; callers sharing one tracker across threads must wrap it.
#[derive(Clone, Debug)]
pub struct TestCaseTracker {
    config: TrackerConfig,
    pending: PendingRecords,
}

impl TestCaseTracker {
    pub fn new(pending: PendingRecords, config: TrackerConfig) -> Self {
        Self { config, pending }
    }

    /// Populates the pending set once from `source`.
    pub fn load(source: &dyn RecordSource, build_id: &str, config: TrackerConfig) -> Result<Self, TrackerError> {
        let records = source.test_records(build_id)?;
        info!("{}: loaded {} remote test records for build {}", config.tag, records.len(), build_id);
        Ok(Self::new(records.into(), config))
    }

    pub fn pending(&self) -> &PendingRecords {
        &self.pending
    }

    pub fn find_session(&mut self, test_case_name: &str, test_index: i64) -> Option<SessionMatch> {
        let hash = test_case_hash(test_case_name);
        self.find_session_with_hash(test_case_name, &hash, test_index)
    }

    pub fn find_session_with_hash(
        &mut self,
        test_case_name: &str,
        test_case_hash: &str,
        test_index: i64,
    ) -> Option<SessionMatch> {
        find_test_case_session(&mut self.pending, test_case_name, test_case_hash, test_index, &self.config)
    }

    /// Ends the build and hands back whatever was never claimed.
    pub fn finish(self) -> Vec<RemoteTestRecord> {
        self.pending.into_inner()
    }
}
