//! YAML export of vault reports

use std::io::Write;

use chrono::Utc;

use crate::error::{VaultError, VaultResult};
use crate::services::vault::VaultReport;

/// Write a report as YAML, preceded by a comment header
pub fn export_report_yaml<W: Write>(report: &VaultReport, writer: &mut W) -> VaultResult<()> {
    let header = format!(
        "# vultitool vault report\n\
         # Source: {}\n\
         # Generated: {}\n\
         # Tool Version: {}\n\
         #\n\
         # Contains public keys and key-share metadata. Handle with care.\n\n",
        report.file_info.path,
        Utc::now().to_rfc3339(),
        env!("CARGO_PKG_VERSION"),
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| VaultError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| VaultError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::encode_container;
    use crate::record::tests::sample_record_bytes;
    use crate::services::vault::open_vault;
    use std::path::Path;

    #[test]
    fn test_yaml_export() {
        let text = encode_container(1, false, &sample_record_bytes());
        let report =
            VaultReport::build(Path::new("sample.vult"), &open_vault(&text, None).unwrap());

        let mut output = Vec::new();
        export_report_yaml(&report, &mut output).unwrap();
        let yaml_string = String::from_utf8(output).unwrap();

        assert!(yaml_string.starts_with("# vultitool vault report"));
        assert!(yaml_string.contains("# Source: sample.vult"));

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml_string).unwrap();
        assert_eq!(value["vault"]["name"].as_str(), Some("Test Vault"));
        assert_eq!(value["container"]["is_encrypted"].as_bool(), Some(false));
    }
}
