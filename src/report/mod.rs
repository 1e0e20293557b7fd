// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report rendering for findings.
//!
//! Supports multiple output formats:
//! - Text: human-readable summary with failures grouped by severity
//! - JSON: the findings report as a structured record
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::error::Result;
use crate::findings::{Finding, FindingsReport, Severity};
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

/// Render a findings report
pub fn render(report: &FindingsReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Sarif => render_sarif(report),
    }
}

fn render_text(report: &FindingsReport) -> String {
    let mut output = String::new();

    output.push_str("=== Accessibility Healthcheck Report ===\n\n");
    output.push_str(&format!(
        "Generated: {} (v{}, target level {})\n",
        report.meta.timestamp.to_rfc3339(),
        report.meta.version,
        report.meta.target_level
    ));

    let failures = report.failures().len();
    output.push_str(&format!(
        "Results: {} finding(s) ({} pass, {} fail)\n\n",
        report.len(),
        report.len() - failures,
        failures
    ));

    for severity in [Severity::Critical, Severity::Major, Severity::Minor] {
        let sev_findings = report.by_severity(severity);
        if sev_findings.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, sev_findings.len()));
        for finding in sev_findings {
            output.push_str(&format!("[{}] {}\n", finding.id, finding.description));
            output.push_str(&format!(
                "  WCAG {} | Context: {}\n\n",
                finding.wcag, finding.context
            ));
        }
    }

    if report.blocks_release() {
        output.push_str("RESULT: RELEASE BLOCKED (major findings)\n");
    } else if report.has_failures() {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: String,
    message: SarifMessage,
    properties: SarifProperties,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifProperties {
    finding_id: String,
    context: String,
    severity: Severity,
}

fn sarif_result(finding: &Finding) -> SarifResult {
    let level = match finding.severity {
        Severity::Critical | Severity::Major => "error",
        Severity::Minor => "warning",
        Severity::Info => "note",
    };

    SarifResult {
        rule_id: format!("WCAG-{}-{}", finding.wcag, finding.signal),
        level: level.to_string(),
        message: SarifMessage {
            text: finding.description.clone(),
        },
        properties: SarifProperties {
            finding_id: finding.id.clone(),
            context: finding.context.to_string(),
            severity: finding.severity,
        },
    }
}

fn render_sarif(report: &FindingsReport) -> Result<String> {
    let results = report.failures().into_iter().map(sarif_result).collect();

    let sarif = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11y-healthcheck".to_string(),
                    version: report.meta.version.clone(),
                },
            },
            results,
        }],
    };

    Ok(serde_json::to_string_pretty(&sarif)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::ReportMeta;
    use crate::mapper::WcagLevel;
    use crate::signals::SignalKind;
    use crate::simulate::ContextId;
    use chrono::{TimeZone, Utc};

    fn finding(id: &str, context: ContextId, severity: Severity) -> Finding {
        Finding {
            id: id.to_string(),
            signal: SignalKind::TouchTarget,
            severity,
            wcag: "2.5.5".to_string(),
            context,
            pass: severity == Severity::Info,
            description: format!("touch-target in {}", context),
        }
    }

    fn sample_report(findings: Vec<Finding>) -> FindingsReport {
        FindingsReport {
            meta: ReportMeta {
                timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
                version: "0.1.0".to_string(),
                target_level: WcagLevel::AA,
            },
            findings,
        }
    }

    #[test]
    fn test_text_report_all_pass() {
        let report = sample_report(vec![finding("f-001", ContextId::Desktop, Severity::Info)]);
        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("1 pass, 0 fail"));
        assert!(text.contains("RESULT: PASS\n"));
    }

    #[test]
    fn test_text_report_with_failures() {
        let report = sample_report(vec![
            finding("f-001", ContextId::Desktop, Severity::Minor),
            finding("f-002", ContextId::Mobile, Severity::Major),
        ]);
        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("--- MAJOR (1) ---"));
        assert!(text.contains("[f-002] touch-target in mobile"));
        assert!(text.contains("WCAG 2.5.5 | Context: desktop"));
        assert!(text.contains("RELEASE BLOCKED"));
    }

    #[test]
    fn test_json_report() {
        let report = sample_report(vec![finding("f-001", ContextId::KeyboardOnly, Severity::Minor)]);
        let json = render(&report, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed["meta"]["version"], "0.1.0");
        assert_eq!(parsed["findings"][0]["context"], "keyboard-only");
        assert_eq!(parsed["findings"][0]["severity"], "minor");
        assert_eq!(parsed["findings"][0]["signal"], "touch-target");
    }

    #[test]
    fn test_sarif_report_only_failures() {
        let report = sample_report(vec![
            finding("f-001", ContextId::Desktop, Severity::Info),
            finding("f-002", ContextId::Mobile, Severity::Major),
        ]);
        let sarif = render(&report, OutputFormat::Sarif).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&sarif).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        let results = parsed["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["ruleId"], "WCAG-2.5.5-touch-target");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(results[0]["properties"]["findingId"], "f-002");
    }
}
