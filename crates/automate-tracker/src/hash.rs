use sha2::{Digest, Sha256};

/// Stable identity hash for a test case display name (lowercase hex SHA-256).
pub fn test_case_hash(test_case_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(test_case_name.as_bytes());
    hex::encode(hasher.finalize())
}
