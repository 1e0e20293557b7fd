// SPDX-License-Identifier: PMPL-1.0-or-later
//! Interactive `check` session.
//!
//! Prompts for a source, the contexts to simulate and a target level, then
//! asks for confirmation. Input and output are generic so sessions can be
//! scripted.

use crate::error::Result;
use crate::findings::FindingsReport;
use crate::mapper::WcagLevel;
use crate::simulate::{ContextId, ContextProfile};
use std::io::{BufRead, Write};

/// Printed when a URL is entered; extraction always uses the sample component
pub const LIVE_EXTRACTION_NOTE: &str =
    "live extraction not yet implemented — running with sample data";

const RULE: &str = "-------------------------------------";

/// Answers collected by one interactive session
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    /// URL the operator entered, if any
    pub source_url: Option<String>,
    pub contexts: Vec<ContextId>,
    pub level: WcagLevel,
}

impl CheckOptions {
    /// Built-in profiles for the selected contexts
    pub fn profiles(&self) -> Vec<ContextProfile> {
        self.contexts.iter().copied().map(ContextProfile::builtin).collect()
    }

    fn source_label(&self) -> &str {
        self.source_url.as_deref().unwrap_or("Sample data")
    }
}

/// Context menu choice; anything other than 1-3 selects every context
pub fn parse_context_choice(answer: &str) -> Vec<ContextId> {
    match answer.trim() {
        "1" => vec![ContextId::Desktop],
        "2" => vec![ContextId::Mobile],
        "3" => vec![ContextId::KeyboardOnly],
        _ => ContextId::ALL.to_vec(),
    }
}

/// Level menu choice; only "2" selects AAA
pub fn parse_level_choice(answer: &str) -> WcagLevel {
    if answer.trim() == "2" {
        WcagLevel::AAA
    } else {
        WcagLevel::AA
    }
}

/// Write a question and read one trimmed answer. End of input reads as empty.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn join_contexts(contexts: &[ContextId]) -> String {
    contexts.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
}

/// Run the prompt sequence. Returns `None` when the operator cancels.
pub fn prompt_options<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<CheckOptions>> {
    writeln!(output, "Accessibility Healthcheck v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(output)?;

    let url = ask(input, output, "Component URL (or Enter for sample data): ")?;
    let source_url = if url.is_empty() {
        writeln!(output, "-> Using sample data (Button component)\n")?;
        None
    } else {
        writeln!(output, "-> Captured URL: {}", url)?;
        writeln!(output, "  Note: {}\n", LIVE_EXTRACTION_NOTE)?;
        Some(url)
    };

    writeln!(output, "Select contexts to evaluate:")?;
    writeln!(output, "  1. Desktop")?;
    writeln!(output, "  2. Mobile")?;
    writeln!(output, "  3. Keyboard-only")?;
    writeln!(output, "  4. All")?;
    let contexts = parse_context_choice(&ask(input, output, "Choice [4]: ")?);
    writeln!(output, "-> Contexts: {}\n", join_contexts(&contexts))?;

    writeln!(output, "Target WCAG conformance:")?;
    writeln!(output, "  1. AA  (standard)")?;
    writeln!(output, "  2. AAA (enhanced)")?;
    let level = parse_level_choice(&ask(input, output, "Choice [1]: ")?);
    writeln!(output, "-> Level: {}\n", level)?;

    let options = CheckOptions {
        source_url,
        contexts,
        level,
    };

    writeln!(output, "{}", RULE)?;
    writeln!(output, "  Source:   {}", options.source_label())?;
    writeln!(output, "  Contexts: {}", join_contexts(&options.contexts))?;
    writeln!(output, "  Level:    {}", options.level)?;
    writeln!(output, "{}", RULE)?;

    let confirm = ask(input, output, "\nRun check? [Y/n]: ")?;
    if confirm.eq_ignore_ascii_case("n") {
        writeln!(output, "Cancelled.")?;
        return Ok(None);
    }

    Ok(Some(options))
}

/// Pass/fail counts followed by one entry per failing finding
pub fn write_summary<W: Write>(report: &FindingsReport, output: &mut W) -> Result<()> {
    let fails = report.failures();
    writeln!(
        output,
        "Results: {} findings ({} pass, {} fail)",
        report.len(),
        report.len() - fails.len(),
        fails.len()
    )?;

    if !fails.is_empty() {
        writeln!(output, "\nFailures:")?;
        for f in &fails {
            writeln!(output, "  [{}] {}", f.severity, f.description)?;
            writeln!(output, "           WCAG {} | Context: {}", f.wcag, f.context)?;
        }
    }
    Ok(())
}
