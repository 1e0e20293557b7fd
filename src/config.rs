// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for a11y-healthcheck
//!
//! ```toml
//! contexts = ["desktop", "mobile", "keyboard-only"]
//! target_level = "AAA"
//! format = "json"
//! output = "out/findings.json"
//!
//! [overrides.mobile]
//! touch-target = 48
//! ```

use crate::error::{HealthcheckError, Result};
use crate::mapper::WcagLevel;
use crate::report::OutputFormat;
use crate::signals::SignalKind;
use crate::simulate::{ContextId, ContextProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default location of the findings artifact
pub const DEFAULT_OUTPUT: &str = "out/findings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Contexts to simulate, in order
    pub contexts: Vec<ContextId>,
    /// Target conformance level; recorded in the report, not used for filtering
    pub target_level: WcagLevel,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Per-context threshold overrides merged onto the built-in profiles
    pub overrides: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contexts: vec![ContextId::Desktop, ContextId::Mobile],
            target_level: WcagLevel::AA,
            format: OutputFormat::Json,
            output: None,
            overrides: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Resolve the configured contexts into simulator profiles
    pub fn profiles(&self) -> Result<Vec<ContextProfile>> {
        let mut extra: BTreeMap<ContextId, Vec<(SignalKind, f64)>> = BTreeMap::new();

        for (ctx_name, table) in &self.overrides {
            let ctx: ContextId = ctx_name.parse().map_err(HealthcheckError::Config)?;
            for (kind_name, threshold) in table {
                let kind: SignalKind = kind_name.parse().map_err(HealthcheckError::Config)?;
                if !threshold.is_finite() || *threshold < 0.0 {
                    return Err(HealthcheckError::Config(format!(
                        "override {}.{} must be a non-negative number, got {}",
                        ctx_name, kind_name, threshold
                    )));
                }
                extra.entry(ctx).or_default().push((kind, *threshold));
            }
        }

        Ok(self
            .contexts
            .iter()
            .map(|&id| {
                extra
                    .get(&id)
                    .into_iter()
                    .flatten()
                    .fold(ContextProfile::builtin(id), |profile, &(kind, threshold)| {
                        profile.with_override(kind, threshold)
                    })
            })
            .collect())
    }

    /// Where `run` writes its report when no path is given on the command line
    pub fn output_path(&self) -> Option<PathBuf> {
        match (&self.output, self.format) {
            (Some(path), _) => Some(path.clone()),
            (None, OutputFormat::Json) => Some(PathBuf::from(DEFAULT_OUTPUT)),
            (None, _) => None,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| HealthcheckError::Config(format!("TOML parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let profiles = Config::default().profiles().unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0], ContextProfile::builtin(ContextId::Desktop));
        assert_eq!(profiles[1].overrides[&SignalKind::TouchTarget], 44.0);
    }

    #[test]
    fn test_parse_toml_with_overrides() {
        let config: Config = toml::from_str(
            r#"
            contexts = ["desktop", "mobile", "keyboard-only"]
            target_level = "AAA"
            format = "sarif"

            [overrides.keyboard-only]
            focus = 3
            [overrides.mobile]
            touch-target = 48
            "#,
        )
        .unwrap();

        assert_eq!(config.target_level, WcagLevel::AAA);
        assert_eq!(config.format, OutputFormat::Sarif);
        assert_eq!(config.output_path(), None);

        let profiles = config.profiles().unwrap();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[1].overrides[&SignalKind::TouchTarget], 48.0);
        assert_eq!(profiles[2].id, ContextId::KeyboardOnly);
        assert_eq!(profiles[2].overrides[&SignalKind::Focus], 3.0);
    }

    #[test]
    fn test_unknown_override_keys_rejected() {
        let mut config = Config::default();
        config
            .overrides
            .insert("tablet".to_string(), BTreeMap::from([("touch-target".to_string(), 40.0)]));
        assert!(matches!(config.profiles(), Err(HealthcheckError::Config(_))));

        let mut config = Config::default();
        config
            .overrides
            .insert("mobile".to_string(), BTreeMap::from([("hover".to_string(), 1.0)]));
        assert!(matches!(config.profiles(), Err(HealthcheckError::Config(_))));
    }

    #[test]
    fn test_negative_override_rejected() {
        let mut config = Config::default();
        config
            .overrides
            .insert("mobile".to_string(), BTreeMap::from([("touch-target".to_string(), -4.0)]));
        assert!(config.profiles().is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/healthcheck.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_path(), Some(PathBuf::from(DEFAULT_OUTPUT)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("healthcheck.toml");
        std::fs::write(&path, "contexts = [\"tablet\"]").unwrap();
        assert!(matches!(load_config(&path), Err(HealthcheckError::Config(_))));
    }
}
