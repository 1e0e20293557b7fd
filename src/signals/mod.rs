// SPDX-License-Identifier: PMPL-1.0-or-later
//! Signal derivation - objective measurements taken from component metadata.
//!
//! For every variant that resolves both the background and the foreground
//! color token, two contrast signals are emitted (WCAG ratio, then
//! perceptual Lc). A single touch-target signal for the whole component
//! follows. Variants missing either token simply produce no contrast
//! signals; malformed colors are an error.

pub mod color;

use crate::error::{HealthcheckError, Result};
use crate::metadata::{ComponentMetadata, Variant, BG_TOKEN, FG_TOKEN};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kind of measurement a signal carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    /// WCAG 2.x luminance contrast ratio
    ColorContrast,
    /// Polarity-aware perceptual contrast (Lc)
    PerceptualContrast,
    /// Interactive target size in pixels
    TouchTarget,
    Spacing,
    Label,
    Keyboard,
    State,
    Focus,
}

impl SignalKind {
    pub const ALL: [SignalKind; 8] = [
        SignalKind::ColorContrast,
        SignalKind::PerceptualContrast,
        SignalKind::TouchTarget,
        SignalKind::Spacing,
        SignalKind::Label,
        SignalKind::Keyboard,
        SignalKind::State,
        SignalKind::Focus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::ColorContrast => "color-contrast",
            SignalKind::PerceptualContrast => "perceptual-contrast",
            SignalKind::TouchTarget => "touch-target",
            SignalKind::Spacing => "spacing",
            SignalKind::Label => "label",
            SignalKind::Keyboard => "keyboard",
            SignalKind::State => "state",
            SignalKind::Focus => "focus",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SignalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown signal kind: {}", s))
    }
}

/// Measured value; the variant in use depends on the signal kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl SignalValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SignalValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for SignalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalValue::Number(n) => write!(f, "{}", n),
            SignalValue::Text(s) => f.write_str(s),
            SignalValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// A single measurement derived from metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub value: SignalValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Signal {
    pub fn numeric(kind: SignalKind, value: f64, unit: &str) -> Self {
        Self {
            kind,
            variant: None,
            value: SignalValue::Number(value),
            unit: Some(unit.to_string()),
            token: None,
        }
    }

    pub fn with_variant(mut self, variant: &str) -> Self {
        self.variant = Some(variant.to_string());
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Value followed by its unit, e.g. `5.83:1` or `36px`
    pub fn display_value(&self) -> String {
        format!("{}{}", self.value, self.unit.as_deref().unwrap_or(""))
    }
}

/// Derive all signals for a component
pub fn derive_signals(metadata: &ComponentMetadata) -> Result<Vec<Signal>> {
    metadata.validate()?;
    let mut signals = Vec::new();

    for variant in &metadata.variants {
        signals.extend(contrast_signals(metadata, variant)?);
    }

    signals.push(Signal::numeric(
        SignalKind::TouchTarget,
        metadata.dimensions.height,
        "px",
    ));

    Ok(signals)
}

/// Contrast signals for one variant; empty when a color token is missing
fn contrast_signals(metadata: &ComponentMetadata, variant: &Variant) -> Result<Vec<Signal>> {
    let (Some(bg_hex), Some(fg_hex)) = (
        metadata.resolve_token(variant, BG_TOKEN),
        metadata.resolve_token(variant, FG_TOKEN),
    ) else {
        debug!("Variant {} lacks contrast tokens, skipping", variant.name);
        return Ok(Vec::new());
    };

    let bg = parse_token_color(variant, BG_TOKEN, bg_hex)?;
    let fg = parse_token_color(variant, FG_TOKEN, fg_hex)?;

    let ratio = color::contrast_ratio(bg, fg);
    let lc = color::perceptual_contrast(fg, bg);
    debug!("Variant {}: ratio {}:1, Lc {}", variant.name, ratio, lc);

    Ok(vec![
        Signal::numeric(SignalKind::ColorContrast, ratio, ":1")
            .with_variant(&variant.name)
            .with_token(BG_TOKEN),
        Signal::numeric(SignalKind::PerceptualContrast, lc.abs(), "Lc")
            .with_variant(&variant.name)
            .with_token(BG_TOKEN),
    ])
}

fn parse_token_color(variant: &Variant, token: &str, value: &str) -> Result<color::Rgb> {
    color::parse_hex_color(value).map_err(|reason| HealthcheckError::ColorParse {
        variant: variant.name.clone(),
        token: token.to_string(),
        value: value.to_string(),
        reason,
    })
}
