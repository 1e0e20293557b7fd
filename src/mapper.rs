// SPDX-License-Identifier: PMPL-1.0-or-later
//! Assertion mapping - pairs each signal with its WCAG success criterion.
//!
//! | Signal              | Criterion | Level | Threshold |
//! |---------------------|-----------|-------|-----------|
//! | color-contrast      | 1.4.3     | AA    | 4.5       |
//! | touch-target        | 2.5.5     | AAA   | 44        |
//! | everything else     | unknown   | AA    | 0         |

use crate::signals::{Signal, SignalKind};
use serde::{Deserialize, Serialize};

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Criterion a signal kind is judged against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub wcag: &'static str,
    pub level: WcagLevel,
    pub threshold: f64,
}

impl Rule {
    /// Placeholder for measurements with no WCAG 2.x criterion
    pub const UNMAPPED: Rule = Rule {
        wcag: "unknown",
        level: WcagLevel::AA,
        threshold: 0.0,
    };

    pub const fn new(wcag: &'static str, level: WcagLevel, threshold: f64) -> Self {
        Self { wcag, level, threshold }
    }
}

/// Look up the rule for a signal kind
pub fn rule_for(kind: SignalKind) -> Rule {
    match kind {
        SignalKind::ColorContrast => Rule::new("1.4.3", WcagLevel::AA, 4.5),
        SignalKind::TouchTarget => Rule::new("2.5.5", WcagLevel::AAA, 44.0),
        SignalKind::PerceptualContrast
        | SignalKind::Spacing
        | SignalKind::Label
        | SignalKind::Keyboard
        | SignalKind::State
        | SignalKind::Focus => Rule::UNMAPPED,
    }
}

/// A signal judged against its criterion at the baseline threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    pub signal: Signal,
    pub wcag: String,
    pub level: WcagLevel,
    pub threshold: f64,
    pub pass: bool,
}

impl Assertion {
    /// Evaluate a signal against a threshold; non-numeric signals always pass
    pub fn evaluate(signal: &Signal, threshold: f64) -> bool {
        signal
            .value
            .as_number()
            .map_or(true, |value| value >= threshold)
    }
}

/// Map each signal to one assertion, preserving order
pub fn map_to_assertions(signals: &[Signal]) -> Vec<Assertion> {
    signals
        .iter()
        .map(|signal| {
            let rule = rule_for(signal.kind);
            Assertion {
                signal: signal.clone(),
                wcag: rule.wcag.to_string(),
                level: rule.level,
                threshold: rule.threshold,
                pass: Assertion::evaluate(signal, rule.threshold),
            }
        })
        .collect()
}
