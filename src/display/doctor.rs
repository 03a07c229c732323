//! Diagnostics formatting

use crate::services::doctor::{EnvironmentReport, HealthReport};

pub fn format_health(report: &HealthReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("vultitool {} health check\n\n", report.version));

    for check in &report.checks {
        let mark = if check.passed { "OK  " } else { "FAIL" };
        output.push_str(&format!("[{}] {}: {}\n", mark, check.name, check.detail));
    }

    output.push('\n');
    if report.all_passed() {
        output.push_str("All health checks passed!\n");
    } else {
        output.push_str("Health check failed!\n");
    }
    output
}

pub fn format_environment(report: &EnvironmentReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("vultitool {}\n\n", report.version));
    output.push_str(&format!("Working directory: {}\n", report.working_dir.display()));
    output.push_str(&format!("Config directory:  {}\n", report.config_dir.display()));
    output.push_str(&format!(
        "Settings file:     {} ({})\n",
        report.settings_file.display(),
        if report.settings_present { "present" } else { "defaults" }
    ));
    output.push_str(&format!(
        "Export format:     {}{}\n",
        report.settings.export_format,
        if report.settings.pretty_json { " (pretty)" } else { "" }
    ));
    output.push_str(&format!("Log filter:        {}\n", report.settings.log_filter));

    output.push_str("\nDecryption schemes (in resolution order):\n");
    for (i, scheme) in report.schemes.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, scheme.summary));
    }

    output.push_str(&format!("\n.vult files found: {}\n", report.vult_files.len()));
    for file in &report.vult_files {
        output.push_str(&format!("  - {} ({} bytes)\n", file.path.display(), file.size));
    }
    output
}
