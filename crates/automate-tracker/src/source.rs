use std::path::PathBuf;

use automate_core::RemoteTestRecord;

use crate::error::TrackerError;

/// Supplies the remote test records recorded for a build.
pub trait RecordSource {
    fn test_records(&self, build_id: &str) -> Result<Vec<RemoteTestRecord>, TrackerError>;
}

/// Reads `<root>/<build_id>.json`, a JSON array of remote records.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    pub root: PathBuf,
}

impl JsonFileSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path_for(&self, build_id: &str) -> PathBuf {
        self.root.join(format!("{build_id}.json"))
    }
}

impl RecordSource for JsonFileSource {
    fn test_records(&self, build_id: &str) -> Result<Vec<RemoteTestRecord>, TrackerError> {
        let path = self.path_for(build_id);
        let bytes = std::fs::read(&path).map_err(|source| TrackerError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| TrackerError::Parse { path, source })
    }
}
