// SPDX-License-Identifier: PMPL-1.0-or-later
//! Findings generation - turns simulation results into report records.
//!
//! Ids follow input order (`f-001`, `f-002`, ...), so the simulator's
//! context-major ordering is preserved verbatim.

use crate::mapper::WcagLevel;
use crate::signals::SignalKind;
use crate::simulate::{ContextId, SimulationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline version recorded in report metadata
pub const PIPELINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reserved; no current rule produces it
    Critical,
    /// Failure in the mobile context
    Major,
    /// Failure in any other context
    Minor,
    /// Passing result
    Info,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Major)
    }

    /// Severity for a simulated result
    pub fn for_result(result: &SimulationResult) -> Self {
        if result.pass {
            Severity::Info
        } else if result.context == ContextId::Mobile {
            Severity::Major
        } else {
            Severity::Minor
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Major => write!(f, "MAJOR"),
            Severity::Minor => write!(f, "MINOR"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// One reported accessibility judgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub signal: SignalKind,
    pub severity: Severity,
    pub wcag: String,
    pub context: ContextId,
    pub pass: bool,
    pub description: String,
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    /// Conformance level requested by the operator; recorded, not applied
    pub target_level: WcagLevel,
}

/// The findings report produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingsReport {
    pub meta: ReportMeta,
    pub findings: Vec<Finding>,
}

impl FindingsReport {
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn passes(&self) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.pass).collect()
    }

    pub fn failures(&self) -> Vec<&Finding> {
        self.findings.iter().filter(|f| !f.pass).collect()
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| !f.pass)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }
}

fn describe(result: &SimulationResult) -> String {
    let signal = &result.assertion.signal;
    if result.pass {
        format!(
            "{} passes in {} context ({})",
            signal.kind,
            result.context,
            signal.display_value()
        )
    } else {
        format!(
            "{} fails in {} context: {} < {}",
            signal.kind,
            result.context,
            signal.display_value(),
            result.effective_threshold()
        )
    }
}

/// Build a report stamped with the current time
pub fn generate(results: &[SimulationResult], target_level: WcagLevel) -> FindingsReport {
    generate_at(results, target_level, Utc::now())
}

/// Build a report with a caller-supplied timestamp
pub fn generate_at(
    results: &[SimulationResult],
    target_level: WcagLevel,
    timestamp: DateTime<Utc>,
) -> FindingsReport {
    let findings = results
        .iter()
        .enumerate()
        .map(|(idx, result)| Finding {
            id: format!("f-{:03}", idx + 1),
            signal: result.assertion.signal.kind,
            severity: Severity::for_result(result),
            wcag: result.assertion.wcag.clone(),
            context: result.context,
            pass: result.pass,
            description: describe(result),
        })
        .collect();

    FindingsReport {
        meta: ReportMeta {
            timestamp,
            version: PIPELINE_VERSION.to_string(),
            target_level,
        },
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_to_assertions;
    use crate::signals::Signal;
    use crate::simulate::{default_contexts, simulate};
    use chrono::TimeZone;

    fn sample_results() -> Vec<SimulationResult> {
        let assertions = map_to_assertions(&[
            Signal::numeric(SignalKind::ColorContrast, 5.83, ":1").with_variant("Primary"),
            Signal::numeric(SignalKind::TouchTarget, 36.0, "px"),
        ]);
        simulate(&assertions, &default_contexts())
    }

    #[test]
    fn test_sequential_ids() {
        let report = generate(&sample_results(), WcagLevel::AA);
        let ids: Vec<&str> = report.findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f-001", "f-002", "f-003", "f-004"]);
    }

    #[test]
    fn test_severity_rules() {
        let report = generate(&sample_results(), WcagLevel::AA);
        let severities: Vec<Severity> = report.findings.iter().map(|f| f.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Info, Severity::Minor, Severity::Info, Severity::Major]
        );
        for finding in &report.findings {
            assert_eq!(finding.pass, finding.severity == Severity::Info);
        }
        assert!(report.by_severity(Severity::Critical).is_empty());
    }

    #[test]
    fn test_descriptions() {
        let report = generate(&sample_results(), WcagLevel::AA);
        assert_eq!(
            report.findings[0].description,
            "color-contrast passes in desktop context (5.83:1)"
        );
        assert_eq!(
            report.findings[1].description,
            "touch-target fails in desktop context: 36px < 44"
        );
        assert_eq!(
            report.findings[3].description,
            "touch-target fails in mobile context: 36px < 44"
        );
    }

    #[test]
    fn test_description_uses_adjusted_threshold() {
        let mut results = sample_results();
        results[3].adjusted_threshold = Some(48.0);
        let report = generate(&results, WcagLevel::AA);
        assert!(report.findings[3].description.ends_with("36px < 48"));
    }

    #[test]
    fn test_meta_and_idempotence() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let first = generate_at(&sample_results(), WcagLevel::AAA, ts);
        let second = generate_at(&sample_results(), WcagLevel::AAA, ts);
        assert_eq!(first, second);
        assert_eq!(first.meta.version, PIPELINE_VERSION);
        assert_eq!(first.meta.target_level, WcagLevel::AAA);
        assert!(first.blocks_release());
        assert_eq!(first.failures().len(), 2);
        assert_eq!(first.passes().len(), 2);
    }

    #[test]
    fn test_empty_results() {
        let report = generate(&[], WcagLevel::AA);
        assert!(report.is_empty());
        assert!(!report.has_failures());
    }
}
