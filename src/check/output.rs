//! Terminal output rendering for check reports.

use super::schema::CheckReport;
use colored::*;

/// Render a human-readable summary of a check report for the terminal
pub fn render_check_report(report: &CheckReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    for finding in &report.findings {
        out.push_str(&format!("  ✗ {}\n", finding.describe()));
    }
    out.push_str(&render_status(report));

    out
}

fn render_header(report: &CheckReport) -> String {
    let mut out = String::new();
    out.push_str("\n🔎 ");
    out.push_str(&"Trace Expectation Check".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Trace:     {}\n", report.source));
    out.push_str(&format!(
        "I/O mode:  {}\n",
        if report.direct_io { "direct" } else { "buffered" }
    ));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_status(report: &CheckReport) -> String {
    let mut out = String::new();
    out.push_str("---------------------------------------------------\n");
    let status_msg = if report.summary.passed() {
        "✅ STATUS: PASSED".green().bold()
    } else {
        format!(
            "❌ STATUS: FAILED ({} findings)",
            report.summary.finding_count
        )
        .red()
        .bold()
    };
    out.push_str(&status_msg.to_string());
    out.push('\n');
    out
}
