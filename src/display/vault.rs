//! Vault report formatting
//!
//! Formats vault reports and validation results for terminal output.

use crate::services::vault::{KeyShareView, VaultReport};
use crate::validate::ValidationIssue;

/// One-paragraph overview of a vault
pub fn format_summary(report: &VaultReport) -> String {
    let Some(vault) = &report.vault else {
        return format!("{}: container has no vault data\n", report.file_info.path);
    };

    let name = if vault.name.is_empty() { "Unnamed" } else { vault.name.as_str() };

    let mut output = String::new();
    output.push_str(&format!("Vault:   {}\n", name));
    output.push_str(&format!("Type:    {}\n", vault.lib_type.name()));
    output.push_str(&format!("Signers: {}\n", vault.signers.len()));
    output.push_str(&format!("Shares:  {}\n", vault.key_shares.len()));
    if let Some(datetime) = vault.created_at.as_ref().and_then(|c| c.datetime.as_deref()) {
        output.push_str(&format!("Created: {}\n", datetime));
    }
    output
}

/// Full report, optionally listing the JSON keys of decoded key shares
pub fn format_detailed(report: &VaultReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("=== Vault Analysis: {} ===\n", report.file_info.path));
    output.push_str(&format!(
        "File Size:         {} chars -> {} bytes\n",
        report.file_info.size_chars, report.file_info.size_bytes
    ));
    output.push_str(&format!("Container Version: {}\n", report.container.version));
    output.push_str(&format!(
        "Encrypted:         {}\n",
        if report.container.is_encrypted { "Yes" } else { "No" }
    ));
    if let Some(scheme) = report.container.scheme {
        output.push_str(&format!("Decrypted With:    {}\n", scheme));
    }

    let Some(vault) = &report.vault else {
        output.push_str("\nContainer has no vault data.\n");
        return output;
    };

    output.push('\n');
    output.push_str(&format!(
        "Vault Name:        '{}'\n",
        if vault.name.is_empty() { "Unnamed" } else { vault.name.as_str() }
    ));
    output.push_str(&format!("Crypto Type:       {}\n", vault.lib_type.name()));
    output.push_str(&format!("ECDSA Public Key:  {}\n", or_none(&vault.public_key_ecdsa)));
    if !vault.public_key_eddsa.is_empty() {
        output.push_str(&format!("EdDSA Public Key:  {}\n", vault.public_key_eddsa));
    }
    output.push_str(&format!("Local Party ID:    {}\n", or_none(&vault.local_party_id)));
    if !vault.hex_chain_code.is_empty() {
        output.push_str(&format!("Chain Code:        {}\n", vault.hex_chain_code));
    }
    if !vault.reshare_prefix.is_empty() {
        output.push_str(&format!("Reshare Prefix:    {}\n", vault.reshare_prefix));
    }
    if let Some(datetime) = vault.created_at.as_ref().and_then(|c| c.datetime.as_deref()) {
        output.push_str(&format!("Created:           {}\n", datetime));
    }

    output.push_str(&format!("\nSigners ({}):\n", vault.signers.len()));
    for (i, signer) in vault.signers.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, signer));
    }

    output.push_str(&format!("\nKey Shares ({}):\n", vault.key_shares.len()));
    for (i, share) in vault.key_shares.iter().enumerate() {
        output.push_str(&format!("  Share {}:\n", i + 1));
        output.push_str(&format!("    Public Key:  {}\n", or_none(&share.public_key)));
        output.push_str(&format!("    Data Length: {} chars\n", share.keyshare_length));
        if verbose {
            if let Some(serde_json::Value::Object(map)) = &share.keyshare_data {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                output.push_str(&format!("    Data Keys:   {}\n", keys.join(", ")));
            }
        }
    }

    output
}

/// Decoded key-share payloads; callers decide when this is shown
pub fn format_key_share_data(shares: &[KeyShareView]) -> String {
    let mut output = String::from("\nKEY SHARE DATA (SENSITIVE)\n");
    for (i, share) in shares.iter().enumerate() {
        let data = match &share.keyshare_data {
            Some(serde_json::Value::String(marker)) => marker.clone(),
            Some(value) => value.to_string(),
            None => "[empty]".to_string(),
        };
        output.push_str(&format!("Share {} Data: {}\n", i + 1, data));
    }
    output
}

/// Validation outcome
pub fn format_issues(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return "Vault validation passed\n".to_string();
    }

    let mut output = String::from("Validation failed:\n");
    for issue in issues {
        output.push_str(&format!("  - {}\n", issue));
    }
    output
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "None"
    } else {
        value
    }
}
