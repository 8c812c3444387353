pub mod archive;
pub mod audit;
pub mod hash;
pub mod ledger;
pub mod publish;

use reportseal_core::LedgerEntry;

/// Process exit codes for audit outcomes
pub const EXIT_MATCH: i32 = 0;
pub const EXIT_MISMATCH: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;

/// Print a ledger entry in the same layout for every command
pub(crate) fn print_entry(entry: &LedgerEntry) {
    println!("  job_id: {}", entry.job_id);
    println!("  report_hash: {}", entry.report_hash);
    println!("  product_name: {}", entry.product_name);
    println!("  username: {}", entry.username);
    match entry.recorded_at() {
        Some(at) => println!("  timestamp: {} ({})", entry.timestamp, at.to_rfc3339()),
        None => println!("  timestamp: {}", entry.timestamp),
    }
    println!("  uploaded_by: {}", entry.uploaded_by);
}
