//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;

use crate::cli::args::{OutputFormat, VeracityArgs};
use crate::error::Result;
use crate::ml::predictor::{Explanation, HealthReport};
use crate::review::{ClassificationResult, PredictionStats};

/// One classified line of a batch input file.
#[derive(Debug, Clone, Serialize)]
pub struct BatchLine {
    /// 1-based line number in the input file.
    pub line: usize,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// Result structure for batch classification.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    pub results: Vec<BatchLine>,
    pub stats: PredictionStats,
}

/// Rendering of a command result for people.
pub trait HumanOutput {
    /// Render as plain text, one item per line.
    fn render_human(&self) -> String;
}

impl HumanOutput for ClassificationResult {
    fn render_human(&self) -> String {
        format!(
            "Label: {}\nConfidence: {:.2}\nModel version: {}\n",
            self.label, self.confidence, self.model_version
        )
    }
}

impl HumanOutput for BatchOutput {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for line in &self.results {
            let _ = writeln!(
                out,
                "{:>5}  {:<4}  {:.2}",
                line.line, line.result.label, line.result.confidence
            );
        }
        if !self.results.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.stats.render_human());
        out
    }
}

impl HumanOutput for PredictionStats {
    fn render_human(&self) -> String {
        format!(
            "Total: {}\nReal: {}\nFake: {}\nAverage confidence: {:.2}\n",
            self.total, self.real, self.fake, self.average_confidence
        )
    }
}

impl HumanOutput for Explanation {
    fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Normalized: {}", self.normalized);
        let quoted = self
            .tokens
            .iter()
            .map(|token| format!("{token:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "Tokens: [{quoted}]");
        let _ = writeln!(out, "Features:");
        for (key, count) in &self.features {
            let _ = writeln!(out, "  {key:?}: {count}");
        }
        out
    }
}

impl HumanOutput for HealthReport {
    fn render_human(&self) -> String {
        let mut out = format!(
            "Status: {}\nModel: {}\n",
            if self.ready { "ready" } else { "not ready" },
            self.model
        );
        if let Some(version) = &self.model_version {
            let _ = writeln!(out, "Model version: {version}");
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "Error: {error}");
        }
        out
    }
}

/// Output a result in the format selected on the command line.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &VeracityArgs) -> Result<()> {
    print!("{}", render(result, args.output_format, args.pretty)?);
    Ok(())
}

/// Render a result in the given format.
pub fn render<T: Serialize + HumanOutput>(
    result: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Human => result.render_human(),
        OutputFormat::Json if pretty => format!("{}\n", serde_json::to_string_pretty(result)?),
        OutputFormat::Json => format!("{}\n", serde_json::to_string(result)?),
    })
}
