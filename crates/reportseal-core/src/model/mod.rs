pub mod digest;
pub mod entry;
pub mod report;

pub use digest::{ReportDigest, DIGEST_HEX_LEN};
pub use entry::{Identity, LedgerEntry, WriteReceipt};
pub use report::{DatasetRef, Report, ReportMetadata};
