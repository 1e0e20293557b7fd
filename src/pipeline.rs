// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pipeline runner - extract, signals, map, simulate, generate.
//!
//! Each stage consumes the complete output of the one before it. Only the
//! metadata source performs I/O; every later stage is a pure function.

use crate::error::Result;
use crate::findings::{self, FindingsReport, PIPELINE_VERSION};
use crate::mapper::{self, Assertion, WcagLevel};
use crate::metadata::{ComponentMetadata, MetadataSource};
use crate::signals::{self, Signal};
use crate::simulate::{self, ContextProfile, SimulationResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the `health` command writes unless told otherwise
pub const HEALTH_OUTPUT: &str = "out/health.json";

/// Stage names in execution order
pub const STAGES: [&str; 5] = ["extract", "signals", "map", "simulate", "generate"];

/// Every intermediate product of one run
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub metadata: ComponentMetadata,
    pub signals: Vec<Signal>,
    pub assertions: Vec<Assertion>,
    pub results: Vec<SimulationResult>,
    pub report: FindingsReport,
}

/// Configured pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    contexts: Vec<ContextProfile>,
    target_level: WcagLevel,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(simulate::default_contexts(), WcagLevel::AA)
    }
}

impl Pipeline {
    pub fn new(contexts: Vec<ContextProfile>, target_level: WcagLevel) -> Self {
        Self {
            contexts,
            target_level,
        }
    }

    /// Run every stage, stamping the report with the current time
    pub fn run(&self, source: &dyn MetadataSource) -> Result<PipelineRun> {
        self.run_at(source, Utc::now())
    }

    /// Run every stage with a fixed report timestamp
    pub fn run_at(&self, source: &dyn MetadataSource, timestamp: DateTime<Utc>) -> Result<PipelineRun> {
        info!("Acquiring metadata from {}", source.describe());
        let metadata = source.acquire()?;
        self.evaluate(metadata, timestamp)
    }

    /// Run the stages after extraction on already-acquired metadata.
    /// Fails on metadata with negative or non-finite dimensions.
    pub fn evaluate(&self, metadata: ComponentMetadata, timestamp: DateTime<Utc>) -> Result<PipelineRun> {
        let signals = signals::derive_signals(&metadata)?;
        debug!("Derived {} signals for {}", signals.len(), metadata.name);

        let assertions = mapper::map_to_assertions(&signals);
        debug!(
            "Mapped {} assertions ({} failing at baseline)",
            assertions.len(),
            assertions.iter().filter(|a| !a.pass).count()
        );

        // The target level is reported but does not filter the rule table.
        debug!("Target level {} recorded", self.target_level);
        let results = simulate::simulate(&assertions, &self.contexts);
        debug!("Simulated {} results across {} contexts", results.len(), self.contexts.len());

        let report = findings::generate_at(&results, self.target_level, timestamp);
        info!(
            "Pipeline complete for {}: {} findings, {} failing",
            metadata.name,
            report.len(),
            report.failures().len()
        );

        Ok(PipelineRun {
            metadata,
            signals,
            assertions,
            results,
            report,
        })
    }
}

/// Liveness record written by the `health` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub pipeline: Vec<String>,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "ok".to_string(),
        pipeline: STAGES.iter().map(|s| s.to_string()).collect(),
        version: PIPELINE_VERSION.to_string(),
        timestamp: Utc::now(),
    }
}

pub fn health_output_path(requested: Option<PathBuf>) -> PathBuf {
    requested.unwrap_or_else(|| PathBuf::from(HEALTH_OUTPUT))
}
