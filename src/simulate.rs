// SPDX-License-Identifier: PMPL-1.0-or-later
//! Context simulation - re-evaluates assertions under usage contexts.
//!
//! Each context carries a table of threshold overrides keyed by signal
//! kind. Results are emitted context-major: every assertion for the first
//! context, then every assertion for the next.

use crate::mapper::Assertion;
use crate::signals::SignalKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operational usage scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextId {
    Desktop,
    Mobile,
    KeyboardOnly,
}

impl ContextId {
    pub const ALL: [ContextId; 3] = [ContextId::Desktop, ContextId::Mobile, ContextId::KeyboardOnly];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContextId::Desktop => "desktop",
            ContextId::Mobile => "mobile",
            ContextId::KeyboardOnly => "keyboard-only",
        }
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContextId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContextId::ALL
            .into_iter()
            .find(|ctx| ctx.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown context: {}", s))
    }
}

/// A context together with its threshold overrides
#[derive(Debug, Clone, PartialEq)]
pub struct ContextProfile {
    pub id: ContextId,
    pub overrides: BTreeMap<SignalKind, f64>,
}

impl ContextProfile {
    /// Profile with no overrides
    pub fn new(id: ContextId) -> Self {
        Self {
            id,
            overrides: BTreeMap::new(),
        }
    }

    /// Built-in profile for a context
    pub fn builtin(id: ContextId) -> Self {
        match id {
            ContextId::Desktop | ContextId::KeyboardOnly => Self::new(id),
            ContextId::Mobile => Self::new(id).with_override(SignalKind::TouchTarget, 44.0),
        }
    }

    pub fn with_override(mut self, kind: SignalKind, threshold: f64) -> Self {
        self.overrides.insert(kind, threshold);
        self
    }
}

/// Contexts simulated when none are requested
pub fn default_contexts() -> Vec<ContextProfile> {
    vec![
        ContextProfile::builtin(ContextId::Desktop),
        ContextProfile::builtin(ContextId::Mobile),
    ]
}

/// An assertion evaluated in one context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub assertion: Assertion,
    pub context: ContextId,
    pub pass: bool,
    /// Set only when the context overrides this signal kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_threshold: Option<f64>,
}

impl SimulationResult {
    /// Threshold actually applied in this context
    pub fn effective_threshold(&self) -> f64 {
        self.adjusted_threshold.unwrap_or(self.assertion.threshold)
    }
}

/// Evaluate every assertion under every context, context-major
pub fn simulate(assertions: &[Assertion], contexts: &[ContextProfile]) -> Vec<SimulationResult> {
    let mut results = Vec::with_capacity(assertions.len() * contexts.len());

    for profile in contexts {
        for assertion in assertions {
            let adjusted_threshold = profile.overrides.get(&assertion.signal.kind).copied();
            let pass = match adjusted_threshold {
                Some(threshold) => Assertion::evaluate(&assertion.signal, threshold),
                None => assertion.pass,
            };

            results.push(SimulationResult {
                assertion: assertion.clone(),
                context: profile.id,
                pass,
                adjusted_threshold,
            });
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{map_to_assertions, WcagLevel};
    use crate::signals::{Signal, SignalValue};

    fn touch_assertion(value: f64, baseline: f64) -> Assertion {
        let signal = Signal::numeric(SignalKind::TouchTarget, value, "px");
        Assertion {
            pass: value >= baseline,
            signal,
            wcag: "2.5.5".to_string(),
            level: WcagLevel::AAA,
            threshold: baseline,
        }
    }

    #[test]
    fn test_result_count_and_order() {
        let assertions = map_to_assertions(&[
            Signal::numeric(SignalKind::ColorContrast, 5.0, ":1"),
            Signal::numeric(SignalKind::TouchTarget, 36.0, "px"),
        ]);
        let contexts: Vec<ContextProfile> =
            ContextId::ALL.into_iter().map(ContextProfile::builtin).collect();
        let results = simulate(&assertions, &contexts);

        assert_eq!(results.len(), assertions.len() * contexts.len());
        let order: Vec<(ContextId, SignalKind)> = results
            .iter()
            .map(|r| (r.context, r.assertion.signal.kind))
            .collect();
        assert_eq!(
            order,
            vec![
                (ContextId::Desktop, SignalKind::ColorContrast),
                (ContextId::Desktop, SignalKind::TouchTarget),
                (ContextId::Mobile, SignalKind::ColorContrast),
                (ContextId::Mobile, SignalKind::TouchTarget),
                (ContextId::KeyboardOnly, SignalKind::ColorContrast),
                (ContextId::KeyboardOnly, SignalKind::TouchTarget),
            ]
        );
    }

    #[test]
    fn test_mobile_applies_44_regardless_of_baseline() {
        let mobile = [ContextProfile::builtin(ContextId::Mobile)];
        for baseline in [0.0, 24.0, 44.0, 48.0] {
            let results = simulate(&[touch_assertion(40.0, baseline)], &mobile);
            assert_eq!(results[0].adjusted_threshold, Some(44.0));
            assert!(!results[0].pass);
        }
        let results = simulate(&[touch_assertion(46.0, 48.0)], &mobile);
        assert!(results[0].pass);
    }

    #[test]
    fn test_no_override_reuses_baseline() {
        let desktop = [ContextProfile::builtin(ContextId::Desktop)];
        let results = simulate(&[touch_assertion(36.0, 44.0)], &desktop);
        assert_eq!(results[0].adjusted_threshold, None);
        assert!(!results[0].pass);
        assert_eq!(results[0].effective_threshold(), 44.0);
    }

    #[test]
    fn test_override_keeps_non_numeric_baseline() {
        let signal = Signal {
            kind: SignalKind::Focus,
            variant: None,
            value: SignalValue::Text("outline".to_string()),
            unit: None,
            token: None,
        };
        let assertions = map_to_assertions(&[signal]);
        let ctx = [ContextProfile::new(ContextId::KeyboardOnly).with_override(SignalKind::Focus, 3.0)];
        let results = simulate(&assertions, &ctx);
        assert_eq!(results[0].adjusted_threshold, Some(3.0));
        assert!(results[0].pass);
    }

    #[test]
    fn test_context_parse() {
        assert_eq!("keyboard-only".parse::<ContextId>(), Ok(ContextId::KeyboardOnly));
        assert_eq!("Mobile".parse::<ContextId>(), Ok(ContextId::Mobile));
        assert!("tablet".parse::<ContextId>().is_err());
    }
}
