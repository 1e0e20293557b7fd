// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-healthcheck - WCAG accessibility healthcheck for design-system components
//!
//! Evaluates a component description through a fixed five-stage pipeline:
//!
//! 1. **Extract**: acquire [`ComponentMetadata`] from a [`MetadataSource`]
//! 2. **Signals**: derive contrast ratio (1.4.3), perceptual contrast (Lc)
//!    and touch-target size (2.5.5)
//! 3. **Map**: judge each signal against its WCAG rule at a baseline threshold
//! 4. **Simulate**: re-judge under desktop, mobile and keyboard-only contexts
//! 5. **Generate**: assign ids, severity and descriptions to every result
//!
//! ## Example
//!
//! ```
//! use a11y_healthcheck::{Pipeline, SampleSource, Severity};
//!
//! let run = Pipeline::default().run(&SampleSource).unwrap();
//! let majors = run.report.by_severity(Severity::Major);
//! assert_eq!(majors.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod findings;
pub mod interactive;
pub mod mapper;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod signals;
pub mod simulate;

pub use config::{load_config, Config};
pub use error::{HealthcheckError, Result};
pub use findings::{Finding, FindingsReport, Severity};
pub use mapper::{Assertion, WcagLevel};
pub use metadata::{ComponentMetadata, JsonFileSource, MetadataSource, SampleSource};
pub use pipeline::{Pipeline, PipelineRun};
pub use report::{render, OutputFormat};
pub use signals::{Signal, SignalKind, SignalValue};
pub use simulate::{ContextId, ContextProfile, SimulationResult};
