//! JSON export of vault reports

use std::io::Write;

use crate::error::{VaultError, VaultResult};
use crate::services::vault::VaultReport;

/// Write a report as JSON
pub fn export_report_json<W: Write>(
    report: &VaultReport,
    writer: &mut W,
    pretty: bool,
) -> VaultResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)
    } else {
        serde_json::to_writer(&mut *writer, report)
    }
    .map_err(|e| VaultError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| VaultError::Export(e.to_string()))?;
    Ok(())
}
