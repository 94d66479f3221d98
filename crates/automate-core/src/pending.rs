use crate::model::RemoteTestRecord;

/// Remote records for one build that have not been claimed by a local test yet.
///
/// Order is whatever the caller supplied (usually the remote API response
/// order) and is never re-sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingRecords {
    records: Vec<RemoteTestRecord>,
}

impl PendingRecords {
    pub fn new(records: Vec<RemoteTestRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemoteTestRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[RemoteTestRecord] {
        &self.records
    }

    /// Removes and returns the record at `idx`, keeping the order of the rest.
    pub fn remove(&mut self, idx: usize) -> RemoteTestRecord {
        self.records.remove(idx)
    }

    pub fn into_inner(self) -> Vec<RemoteTestRecord> {
        self.records
    }
}

impl From<Vec<RemoteTestRecord>> for PendingRecords {
    fn from(records: Vec<RemoteTestRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<RemoteTestRecord> for PendingRecords {
    fn from_iter<I: IntoIterator<Item = RemoteTestRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PendingRecords {
    type Item = &'a RemoteTestRecord;
    type IntoIter = std::slice::Iter<'a, RemoteTestRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
