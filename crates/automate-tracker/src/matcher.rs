use automate_core::{MatchedKey, PendingRecords, SessionMatch, TestHash};
use tracing::debug;

use crate::config::TrackerConfig;

/// Finds the remote record for a local test case and removes it from `records`.
///
/// A record is a candidate only when its index equals `test_index`. Among
/// candidates, a record carrying a hash is compared by hash first; any
/// candidate whose full path equals `test_case_name` also matches. The first
/// match in collection order wins and is claimed, so no other local test can
/// match it later. Returns `None` with `records` untouched when nothing matches.
pub fn find_test_case_session(
    records: &mut PendingRecords,
    test_case_name: &str,
    test_case_hash: &str,
    test_index: i64,
    config: &TrackerConfig,
) -> Option<SessionMatch> {
    let mut found: Option<(usize, bool)> = None;

    for (pos, rec) in records.iter().enumerate() {
        if config.debug {
            debug!("{}: >>  cr => {} | {}", config.tag, test_case_name, test_index);
            debug!("{}: >> atc => {} | {}", config.tag, rec.display_key(), rec.test_index);
        }

        if rec.test_index != test_index {
            if config.debug {
                debug!("{}: >> => Mismatch: {} != {}", config.tag, test_index, rec.test_index);
            }
            continue;
        }

        let matched_hash = matches!(&rec.test_hash, TestHash::Hashed(h) if h == test_case_hash);
        if matched_hash || rec.test_full_path == test_case_name {
            found = Some((pos, matched_hash));
            break;
        }
    }

    let (pos, matched_hash) = found?;
    let rec = records.remove(pos);
    if config.debug {
        debug!(
            "{}: >> CaseResult: {} {{{}}} <=> {{{}}} matched: {}",
            config.tag,
            test_case_name,
            test_index,
            rec.test_index,
            records.len()
        );
    }

    let matched = if matched_hash {
        MatchedKey::Hash(test_case_hash.to_string())
    } else {
        MatchedKey::Name(test_case_name.to_string())
    };
    Some(SessionMatch {
        session_id: rec.session_id,
        matched,
    })
}
