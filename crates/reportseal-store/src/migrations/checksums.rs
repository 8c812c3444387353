//! Checksums recorded alongside each applied migration

use sha2::{Digest, Sha256};

/// Hex SHA-256 of a migration's SQL text
pub fn compute_checksum(sql: &str) -> String {
    hex::encode(Sha256::digest(sql.as_bytes()))
}
