pub mod inspect;
pub mod related;
pub mod search;
pub mod stats;
pub mod suggest;
pub mod types;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::memory::MemorySession;

/// Load and index the snapshot at `path`. Load failures are fatal for every command.
pub fn open_session(path: &Path) -> Result<MemorySession> {
    let session = MemorySession::open(path)
        .with_context(|| format!("failed to load memory from {}", path.display()))?;

    let report = session.store().report();
    if report.skipped_records > 0 || report.duplicate_records > 0 {
        tracing::warn!(
            skipped = report.skipped_records,
            duplicates = report.duplicate_records,
            "some memory records were not loaded"
        );
    }
    Ok(session)
}

/// Pretty-print a value as JSON to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Print the explanation that accompanies an empty result.
fn print_hint(hint: &str) {
    println!("Hint: {hint}");
}
