//! Diagnostics service
//!
//! `run_health_check` exercises the decoding pipeline in-process with a
//! synthetic vault; `environment_report` describes the installation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Settings, ToolPaths};
use crate::container::{decode_container, encode_container};
use crate::crypto::{resolve, seal_primary, SchemeId, SCHEMES};
use crate::error::{VaultError, VaultResult};
use crate::record::{encode_record, CreatedAt, KeyShare, LibType, VaultRecord};
use crate::services::vault::open_vault;

const PROBE_PASSWORD: &str = "vultitool-health-probe";

/// Result of a single health check
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl Check {
    fn from_result(name: &'static str, result: VaultResult<String>) -> Self {
        match result {
            Ok(detail) => Self {
                name,
                passed: true,
                detail,
            },
            Err(e) => Self {
                name,
                passed: false,
                detail: e.to_string(),
            },
        }
    }
}

/// Outcome of `doctor health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub version: String,
    pub checks: Vec<Check>,
}

impl HealthReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

fn probe_record() -> VaultRecord {
    VaultRecord {
        name: "health-probe".to_string(),
        public_key_ecdsa: "02".repeat(33),
        signers: vec!["probe-a".to_string(), "probe-b".to_string()],
        created_at: Some(CreatedAt {
            seconds: 1_700_000_000,
            nanos: 0,
        }),
        key_shares: vec![KeyShare {
            public_key: "02".repeat(33),
            keyshare: "cHJvYmU=".to_string(),
        }],
        local_party_id: "probe-a".to_string(),
        lib_type: LibType::Dkls,
        ..VaultRecord::default()
    }
}

fn check_primary_round_trip(record_bytes: &[u8]) -> VaultResult<String> {
    let sealed = seal_primary(record_bytes, PROBE_PASSWORD)?;
    let resolved = resolve(&sealed, PROBE_PASSWORD)?;
    if resolved.scheme != SchemeId::Primary || resolved.bytes != record_bytes {
        return Err(VaultError::MalformedRecord(format!(
            "round trip resolved via {} with different bytes",
            resolved.scheme
        )));
    }
    Ok(format!("{} bytes sealed and resolved", record_bytes.len()))
}

fn check_wrong_password(record_bytes: &[u8]) -> VaultResult<String> {
    let sealed = seal_primary(record_bytes, PROBE_PASSWORD)?;
    match resolve(&sealed, "not-the-probe-password") {
        Err(VaultError::DecryptionFailed) => Ok("wrong password rejected".to_string()),
        Err(e) => Err(e),
        Ok(resolved) => Err(VaultError::Encryption(format!(
            "wrong password accepted by {}",
            resolved.scheme
        ))),
    }
}

fn check_plain_container(record: &VaultRecord, record_bytes: &[u8]) -> VaultResult<String> {
    let text = encode_container(1, false, record_bytes);
    let container = decode_container(&text)?;
    let opened = open_vault(&text, None)?;
    if opened.record.as_ref() != Some(record) {
        return Err(VaultError::MalformedRecord(
            "decoded record differs from probe".to_string(),
        ));
    }
    Ok(format!(
        "{} base64 chars, envelope {} bytes",
        text.len(),
        container.envelope_bytes
    ))
}

fn check_encrypted_container(record_bytes: &[u8]) -> VaultResult<String> {
    let sealed = seal_primary(record_bytes, PROBE_PASSWORD)?;
    let text = encode_container(1, true, &sealed);
    let opened = open_vault(&text, Some(PROBE_PASSWORD))?;
    match opened.scheme {
        Some(scheme) => Ok(format!("resolved via {}", scheme)),
        None => Err(VaultError::MalformedContainer(
            "encrypted probe was not decrypted".to_string(),
        )),
    }
}

/// Run the in-process self-check
pub fn run_health_check() -> HealthReport {
    let record = probe_record();
    let record_bytes = encode_record(&record);

    let checks = vec![
        Check::from_result("primary scheme round trip", check_primary_round_trip(&record_bytes)),
        Check::from_result("wrong password rejected", check_wrong_password(&record_bytes)),
        Check::from_result("plain container decode", check_plain_container(&record, &record_bytes)),
        Check::from_result("encrypted container decode", check_encrypted_container(&record_bytes)),
    ];

    HealthReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

/// One row of the scheme table
#[derive(Debug, Clone, Serialize)]
pub struct SchemeRow {
    pub id: SchemeId,
    pub summary: String,
}

/// A `.vult` file found next to the caller
#[derive(Debug, Clone, Serialize)]
pub struct VultFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Outcome of `doctor env`
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentReport {
    pub version: String,
    pub working_dir: PathBuf,
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
    pub settings_present: bool,
    pub settings: Settings,
    pub schemes: Vec<SchemeRow>,
    pub vult_files: Vec<VultFile>,
}

/// Describe the installation relative to the current directory
pub fn environment_report(paths: &ToolPaths, settings: &Settings) -> VaultResult<EnvironmentReport> {
    let working_dir = std::env::current_dir()?;
    environment_report_in(paths, settings, &working_dir)
}

/// Describe the installation relative to `working_dir`
pub fn environment_report_in(
    paths: &ToolPaths,
    settings: &Settings,
    working_dir: &Path,
) -> VaultResult<EnvironmentReport> {
    let settings_file = paths.settings_file();

    Ok(EnvironmentReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        working_dir: working_dir.to_path_buf(),
        config_dir: paths.base_dir().clone(),
        settings_present: settings_file.exists(),
        settings_file,
        settings: settings.clone(),
        schemes: SCHEMES
            .iter()
            .map(|s| SchemeRow {
                id: s.id,
                summary: s.summary(),
            })
            .collect(),
        vult_files: find_vult_files(working_dir)?,
    })
}

fn find_vult_files(dir: &Path) -> VaultResult<Vec<VultFile>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "vult") {
            files.push(VultFile {
                size: entry.metadata()?.len(),
                path,
            });
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
