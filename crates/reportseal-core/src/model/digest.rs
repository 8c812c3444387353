use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Result, SealError};

/// Length of the canonical textual form: `0x` + 64 hex digits
pub const DIGEST_HEX_LEN: usize = 66;

/// 256-bit report digest
///
/// Textual form is always `0x` followed by 64 lowercase hex digits. Parsing
/// accepts either hex case, so two digests compare equal whenever their hex
/// forms match case-insensitively.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportDigest([u8; 32]);

impl ReportDigest {
    /// The all-zero digest, rejected by the ledger as an empty hash
    pub const ZERO: ReportDigest = ReportDigest([0u8; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build from a stored byte slice
    ///
    /// # Errors
    ///
    /// Returns `InvalidDigestLength` if the slice is not 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| SealError::InvalidDigestLength {
                length: 2 + bytes.len() * 2,
            })?;
        Ok(Self(arr))
    }

    /// Parse the `0x`-prefixed hex form
    ///
    /// # Errors
    ///
    /// - `InvalidDigestLength` if the text is not exactly 66 characters
    /// - `MalformedDigest` if the prefix or any hex digit is invalid
    pub fn from_hex(text: &str) -> Result<Self> {
        let length = text.chars().count();
        if length != DIGEST_HEX_LEN {
            return Err(SealError::InvalidDigestLength { length });
        }

        let body = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .ok_or_else(|| SealError::MalformedDigest {
                value: text.to_string(),
                reason: "missing 0x prefix".to_string(),
            })?;

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(body, &mut bytes).map_err(|e| SealError::MalformedDigest {
            value: text.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Lowercase `0x`-prefixed hex form (66 characters)
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ReportDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ReportDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReportDigest({})", self.to_hex())
    }
}

impl FromStr for ReportDigest {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for ReportDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ReportDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
