// SPDX-License-Identifier: PMPL-1.0-or-later
//! Component metadata and the sources that acquire it.
//!
//! A [`MetadataSource`] is the only I/O boundary of the pipeline. The
//! built-in [`SampleSource`] returns the Button fixture; [`JsonFileSource`]
//! reads a metadata document exported from a design tool.

use crate::error::{HealthcheckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Background color token consulted for contrast signals
pub const BG_TOKEN: &str = "--ds-color-bg-primary";
/// Foreground (text) color token consulted for contrast signals
pub const FG_TOKEN: &str = "--ds-color-text-on-primary";

/// Pixel dimensions of a component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// A named configuration of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Variant-scoped tokens; these shadow the component's global tokens
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

impl Variant {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: BTreeMap::new(),
            tokens: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_token(mut self, name: &str, value: &str) -> Self {
        self.tokens.insert(name.to_string(), value.to_string());
        self
    }
}

/// Everything the pipeline knows about one design-system component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    pub id: String,
    pub name: String,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
    pub dimensions: Dimensions,
}

impl ComponentMetadata {
    /// Resolve a token for a variant, falling back to the global token table
    pub fn resolve_token<'a>(&'a self, variant: &'a Variant, name: &str) -> Option<&'a str> {
        variant
            .tokens
            .get(name)
            .or_else(|| self.tokens.get(name))
            .map(String::as_str)
    }

    /// Reject dimensions no real component can have
    pub fn validate(&self) -> Result<()> {
        let Dimensions { width, height } = self.dimensions;
        for (label, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(HealthcheckError::InvalidMetadata(format!(
                    "component \"{}\" has {} {}",
                    self.id, label, value
                )));
            }
        }
        Ok(())
    }
}

/// Anything that can supply component metadata to the pipeline
pub trait MetadataSource {
    /// Short label used in logs and the CLI summary
    fn describe(&self) -> String;

    /// Acquire the component description
    fn acquire(&self) -> Result<ComponentMetadata>;
}

/// Fixture source returning the sample Button component
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl MetadataSource for SampleSource {
    fn describe(&self) -> String {
        "sample data (Button component)".to_string()
    }

    fn acquire(&self) -> Result<ComponentMetadata> {
        debug!("Using built-in Button fixture");
        Ok(sample_button())
    }
}

/// Source reading a `ComponentMetadata` JSON document from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetadataSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn acquire(&self) -> Result<ComponentMetadata> {
        info!("Reading component metadata from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path)?;
        let metadata: ComponentMetadata = serde_json::from_str(&content)?;
        metadata.validate()?;
        Ok(metadata)
    }
}

/// The sample Button component with three color variants
pub fn sample_button() -> ComponentMetadata {
    let tokens = [
        ("--ds-font-size-body", "14"),
        ("--ds-font-weight-medium", "500"),
        ("--ds-space-inline", "16"),
        ("--ds-space-block", "12"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    ComponentMetadata {
        id: "button".to_string(),
        name: "Button".to_string(),
        variants: vec![
            Variant::new("Variant=Primary")
                .with_property("variant", "primary")
                .with_token(BG_TOKEN, "#206f77")
                .with_token(FG_TOKEN, "#ffffff"),
            Variant::new("Variant=Secondary")
                .with_property("variant", "secondary")
                .with_token(BG_TOKEN, "#636363")
                .with_token(FG_TOKEN, "#ffffff"),
            Variant::new("Variant=Danger")
                .with_property("variant", "danger")
                .with_token(BG_TOKEN, "#bc002a")
                .with_token(FG_TOKEN, "#ffffff"),
        ],
        tokens,
        dimensions: Dimensions {
            width: 89.5,
            height: 36.0,
        },
    }
}
