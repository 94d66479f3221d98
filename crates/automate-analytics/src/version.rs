use std::io::Write;
use std::path::{Path, PathBuf};

use atomicwrites::{AllowOverwrite, AtomicFile};
use automate_core::ClientId;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

pub const STATE_FILE: &str = "browserstack-analytics.json";

/// What the reporter remembers between builds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionState {
    pub client_id: ClientId,
    pub plugin_version: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VersionTransition {
    NoPriorState,
    SameVersion,
    VersionChanged { previous: String },
}

/// File-backed [`VersionState`] under the host's root directory.
#[derive(Clone, Debug)]
pub struct VersionTracker {
    path: PathBuf,
}

impl VersionTracker {
    pub fn new(root_dir: &Path) -> Self {
        Self {
            path: root_dir.join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<VersionState>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(AnalyticsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let state = serde_json::from_slice(&bytes).map_err(|source| AnalyticsError::Serde {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(state))
    }

    /// Compares the stored version with `current_version` and rewrites the
    /// state when it is missing or stale. An equal version writes nothing.
    pub fn reconcile(&self, current_version: &str) -> Result<VersionTransition> {
        match self.load()? {
            None => {
                self.save(&VersionState {
                    client_id: ClientId::new(),
                    plugin_version: current_version.to_string(),
                })?;
                Ok(VersionTransition::NoPriorState)
            }
            Some(state) if state.plugin_version == current_version => Ok(VersionTransition::SameVersion),
            Some(state) => {
                let previous = state.plugin_version;
                self.save(&VersionState {
                    client_id: state.client_id,
                    plugin_version: current_version.to_string(),
                })?;
                Ok(VersionTransition::VersionChanged { previous })
            }
        }
    }

    pub fn client_id(&self) -> Result<Option<ClientId>> {
        Ok(self.load()?.map(|s| s.client_id))
    }

    fn save(&self, state: &VersionState) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|source| AnalyticsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let bytes = serde_json::to_vec_pretty(state).map_err(|source| AnalyticsError::Serde {
            path: self.path.clone(),
            source,
        })?;
        AtomicFile::new(&self.path, AllowOverwrite)
            .write(|file| file.write_all(&bytes))
            .map_err(|error| AnalyticsError::Write {
                path: self.path.clone(),
                error,
            })?;
        Ok(())
    }
}
