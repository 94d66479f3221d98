use serde::{Deserialize, Serialize};

use crate::ids::SessionId;

/// Identity hash carried by a remote record, if the remote side embeds one.
///
/// On the wire this is an optional string; `null` or a missing field both
/// decode to [`TestHash::Unhashed`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum TestHash {
    Hashed(String),
    #[default]
    Unhashed,
}

impl TestHash {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            TestHash::Hashed(h) => Some(h.as_str()),
            TestHash::Unhashed => None,
        }
    }
}

impl From<Option<String>> for TestHash {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(h) => TestHash::Hashed(h),
            None => TestHash::Unhashed,
        }
    }
}

impl From<TestHash> for Option<String> {
    fn from(value: TestHash) -> Self {
        match value {
            TestHash::Hashed(h) => Some(h),
            TestHash::Unhashed => None,
        }
    }
}

/// One cloud-executed test case awaiting correlation with a local result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTestRecord {
    pub session_id: SessionId,
    pub test_index: i64,
    pub test_full_path: String,
    #[serde(default)]
    pub test_hash: TestHash,
}

impl RemoteTestRecord {
    /// Key shown in diagnostics: the hash when present, else the full path.
    pub fn display_key(&self) -> &str {
        self.test_hash.as_deref().unwrap_or(&self.test_full_path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchedKey {
    Hash(String),
    Name(String),
}

/// Result of a successful correlation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionMatch {
    pub session_id: SessionId,
    pub matched: MatchedKey,
}

impl SessionMatch {
    /// The identity value that matched: the hash if hash-matched, else the name.
    pub fn matched_key(&self) -> &str {
        match &self.matched {
            MatchedKey::Hash(k) | MatchedKey::Name(k) => k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_key_prefers_hash() {
        let rec = RemoteTestRecord {
            session_id: SessionId::from_str("s1"),
            test_index: 0,
            test_full_path: "suite.testA".into(),
            test_hash: TestHash::Hashed("abc".into()),
        };
        assert_eq!(rec.display_key(), "abc");

        let rec = RemoteTestRecord { test_hash: TestHash::Unhashed, ..rec };
        assert_eq!(rec.display_key(), "suite.testA");
    }

    #[test]
    fn matched_key_returns_inner_value() {
        let m = SessionMatch {
            session_id: SessionId::from_str("s2"),
            matched: MatchedKey::Hash("h2".into()),
        };
        assert_eq!(m.matched_key(), "h2");
    }
}
