#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use vultitool::container::encode_container;
use vultitool::crypto::seal_primary;
use vultitool::record::{encode_record, CreatedAt, KeyShare, LibType, VaultRecord};

const TEST_PASSWORD: &str = "vulticli01";

/// Runs the binary with an isolated config dir and no ambient password
fn vultitool(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vultitool").unwrap();
    cmd.env("VULTITOOL_CONFIG_DIR", config_dir);
    cmd.env_remove("VULTITOOL_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn test_record() -> VaultRecord {
    VaultRecord {
        name: "Integration Vault".to_string(),
        public_key_ecdsa: "03b1c2d3e4".to_string(),
        public_key_eddsa: "f00dfeed".to_string(),
        signers: vec!["alice".to_string(), "bob".to_string()],
        created_at: Some(CreatedAt {
            seconds: 1_700_000_000,
            nanos: 0,
        }),
        hex_chain_code: "ab".repeat(32),
        key_shares: vec![
            KeyShare {
                public_key: "03b1c2d3e4".to_string(),
                // {"threshold":2}
                keyshare: "eyJ0aHJlc2hvbGQiOjJ9".to_string(),
            },
            KeyShare {
                public_key: "f00dfeed".to_string(),
                keyshare: "AAECAwQFBgc=".to_string(),
            },
        ],
        local_party_id: "alice".to_string(),
        reshare_prefix: String::new(),
        lib_type: LibType::Gg20,
    }
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn plain_vault(&self) -> PathBuf {
        let text = encode_container(1, false, &encode_record(&test_record()));
        self.write("plain.vult", &text)
    }

    fn encrypted_vault(&self) -> PathBuf {
        let sealed = seal_primary(&encode_record(&test_record()), TEST_PASSWORD).unwrap();
        self.write("encrypted.vult", &encode_container(1, true, &sealed))
    }

    fn cmd(&self) -> Command {
        vultitool(&self.config_dir())
    }
}

#[test]
fn parse_plain_vault_as_json() {
    let fx = Fixture::new();
    let vault = fx.plain_vault();

    let output = fx
        .cmd()
        .args(["vault", "parse", "--json"])
        .arg(&vault)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["container"]["is_encrypted"], false);
    assert_eq!(report["vault"]["name"], "Integration Vault");
    assert_eq!(report["vault"]["lib_type"], "GG20");
    assert_eq!(report["vault"]["key_shares"][0]["keyshare_data"]["threshold"], 2);
    assert_eq!(report["vault"]["key_shares"][1]["keyshare_data"], "[binary/encrypted]");
}

#[test]
fn parse_summary() {
    let fx = Fixture::new();
    let vault = fx.plain_vault();

    fx.cmd()
        .args(["vault", "parse", "--summary"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault:   Integration Vault"))
        .stdout(predicate::str::contains("Signers: 2"));
}

#[test]
fn parse_encrypted_vault_with_password() {
    let fx = Fixture::new();
    let vault = fx.encrypted_vault();

    fx.cmd()
        .args(["vault", "parse", "--password", TEST_PASSWORD])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted:         Yes"))
        .stdout(predicate::str::contains("Decrypted With:    primary"))
        .stdout(predicate::str::contains("Vault Name:        'Integration Vault'"));
}

#[test]
fn password_from_environment() {
    let fx = Fixture::new();
    let vault = fx.encrypted_vault();

    fx.cmd()
        .env("VULTITOOL_PASSWORD", TEST_PASSWORD)
        .args(["vault", "parse", "--summary"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Integration Vault"));
}

#[test]
fn wrong_password_exits_with_decryption_code() {
    let fx = Fixture::new();
    let vault = fx.encrypted_vault();

    fx.cmd()
        .args(["vault", "parse", "--password", "not-it"])
        .arg(&vault)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn missing_password_without_terminal() {
    let fx = Fixture::new();
    let vault = fx.encrypted_vault();

    fx.cmd()
        .args(["vault", "parse"])
        .arg(&vault)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no password was provided"));
}

#[test]
fn malformed_base64_exits_with_input_code() {
    let fx = Fixture::new();
    let vault = fx.write("broken.vult", "this is *not* base64!");

    fx.cmd()
        .args(["vault", "parse"])
        .arg(&vault)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Encoding error"));
}

#[test]
fn missing_file() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["vault", "parse", "does-not-exist.vult"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn validate_clean_vault() {
    let fx = Fixture::new();
    let vault = fx.plain_vault();

    fx.cmd()
        .args(["vault", "validate", "--strict"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault validation passed"));
}

#[test]
fn validate_reports_issues() {
    let fx = Fixture::new();
    let mut record = test_record();
    record.name.clear();
    record.signers.clear();
    let vault = fx.write(
        "incomplete.vult",
        &encode_container(1, false, &encode_record(&record)),
    );

    fx.cmd()
        .args(["vault", "validate"])
        .arg(&vault)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing vault name"))
        .stdout(predicate::str::contains("No signers found"));
}

#[test]
fn inspect_with_keyshares() {
    let fx = Fixture::new();
    let vault = fx.plain_vault();

    fx.cmd()
        .args(["vault", "inspect", "--show-keyshares"])
        .arg(&vault)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Keys:   threshold"))
        .stdout(predicate::str::contains("Share 2 Data: [binary/encrypted]"));
}

#[test]
fn export_yaml() {
    let fx = Fixture::new();
    let vault = fx.encrypted_vault();
    let output = fx.dir.path().join("report.yaml");

    fx.cmd()
        .args(["vault", "export", "--format", "yaml", "--password", TEST_PASSWORD])
        .arg(&vault)
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported vault data to"));

    let yaml = std::fs::read_to_string(&output).unwrap();
    assert!(yaml.starts_with("# vultitool vault report"));
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["container"]["scheme"].as_str(), Some("primary"));
    assert_eq!(value["vault"]["name"].as_str(), Some("Integration Vault"));
}

#[test]
fn export_uses_configured_format() {
    let fx = Fixture::new();
    let vault = fx.plain_vault();
    let output = fx.dir.path().join("report.out");

    std::fs::create_dir_all(fx.config_dir()).unwrap();
    std::fs::write(
        fx.config_dir().join("config.json"),
        r#"{"export_format": "yaml"}"#,
    )
    .unwrap();

    fx.cmd()
        .args(["vault", "export", "-q"])
        .arg(&vault)
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# vultitool vault report"));
}

#[test]
fn decrypt_writes_plaintext() {
    let fx = Fixture::new();
    let vault = fx.encrypted_vault();
    let output = fx.dir.path().join("vault.bin");

    fx.cmd()
        .args(["vault", "decrypt", "--password", TEST_PASSWORD])
        .arg(&vault)
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Decrypted with primary scheme"));

    assert_eq!(std::fs::read(&output).unwrap(), encode_record(&test_record()));
}

#[test]
fn decrypt_empty_encrypted_payload() {
    let fx = Fixture::new();
    let vault = fx.write("empty.vult", &encode_container(1, true, &[]));
    let output = fx.dir.path().join("empty.bin");

    fx.cmd()
        .args(["vault", "decrypt"])
        .arg(&vault)
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Encrypted payload is empty"))
        .stderr(predicate::str::contains("not encrypted").not());

    assert!(std::fs::read(&output).unwrap().is_empty());
}

#[test]
fn doctor_health() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["doctor", "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All health checks passed!"));
}

#[test]
fn doctor_env_json() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["doctor", "env", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["schemes"].as_array().unwrap().len(), 3);
    assert_eq!(report["settings_present"], false);
}
