//! Content checks for decoded vault records

use std::fmt;

use serde::Serialize;

use crate::record::VaultRecord;

/// A problem found in a vault record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingRecord,
    MissingName,
    MissingEcdsaKey,
    NoSigners,
    NoKeyShares,
    UnknownLibType,
    SignerShareMismatch { signers: usize, key_shares: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingRecord => write!(f, "Container has no vault data"),
            ValidationIssue::MissingName => write!(f, "Missing vault name"),
            ValidationIssue::MissingEcdsaKey => write!(f, "Missing ECDSA public key"),
            ValidationIssue::NoSigners => write!(f, "No signers found"),
            ValidationIssue::NoKeyShares => write!(f, "No key shares found"),
            ValidationIssue::UnknownLibType => write!(f, "Unknown lib_type"),
            ValidationIssue::SignerShareMismatch {
                signers,
                key_shares,
            } => write!(
                f,
                "Mismatch between signers and key shares count ({} signers, {} key shares)",
                signers, key_shares
            ),
        }
    }
}

/// Check a record; `strict` adds the library and share-count checks
pub fn validate_record(record: Option<&VaultRecord>, strict: bool) -> Vec<ValidationIssue> {
    let Some(record) = record else {
        return vec![ValidationIssue::MissingRecord];
    };

    let mut issues = Vec::new();

    if record.name.is_empty() {
        issues.push(ValidationIssue::MissingName);
    }
    if record.public_key_ecdsa.is_empty() {
        issues.push(ValidationIssue::MissingEcdsaKey);
    }
    if record.signers.is_empty() {
        issues.push(ValidationIssue::NoSigners);
    }
    if record.key_shares.is_empty() {
        issues.push(ValidationIssue::NoKeyShares);
    }

    if strict {
        if !record.lib_type.is_known() {
            issues.push(ValidationIssue::UnknownLibType);
        }
        if record.signers.len() != record.key_shares.len() {
            issues.push(ValidationIssue::SignerShareMismatch {
                signers: record.signers.len(),
                key_shares: record.key_shares.len(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_record;
    use crate::record::LibType;

    #[test]
    fn test_sample_record_is_clean() {
        assert!(validate_record(Some(&sample_record()), true).is_empty());
    }

    #[test]
    fn test_missing_record() {
        assert_eq!(validate_record(None, false), vec![ValidationIssue::MissingRecord]);
    }

    #[test]
    fn test_empty_record_basic_issues() {
        let issues = validate_record(Some(&VaultRecord::default()), false);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingName,
                ValidationIssue::MissingEcdsaKey,
                ValidationIssue::NoSigners,
                ValidationIssue::NoKeyShares,
            ]
        );
    }

    #[test]
    fn test_strict_checks() {
        let mut record = sample_record();
        record.signers.push("third-party".to_string());
        record.lib_type = LibType::Unknown;

        assert!(validate_record(Some(&record), false).is_empty());

        let issues = validate_record(Some(&record), true);
        assert!(issues.contains(&ValidationIssue::UnknownLibType));
        assert!(issues.contains(&ValidationIssue::SignerShareMismatch {
            signers: 3,
            key_shares: 2
        }));
    }

    #[test]
    fn test_issue_display() {
        assert_eq!(ValidationIssue::NoSigners.to_string(), "No signers found");
    }
}
