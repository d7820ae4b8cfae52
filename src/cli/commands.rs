//! Command implementations for the veracity CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{ReviewLimits, VeracityConfig};
use crate::error::{Result, VeracityError};
use crate::ml::predictor::{Explanation, Predictor};
use crate::review::{ClassificationResult, PredictionStats, RawReviewInput};

/// Exit status for a command that completed successfully.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status for failures, including an unhealthy model.
pub const EXIT_FAILURE: i32 = 1;

/// Execute a CLI command and return the process exit status.
pub fn execute_command(args: &VeracityArgs, config: &VeracityConfig) -> Result<i32> {
    let predictor = Predictor::from_config(config)?;
    let limits = config.limits();

    match &args.command {
        Command::Predict(review) => {
            let result = predict(&predictor, &review.to_input(), &limits)?;
            output_result(&result, args)?;
        }
        Command::Batch(batch_args) => {
            let output = batch(&predictor, &batch_args.input, &limits)?;
            output_result(&output, args)?;
        }
        Command::Inspect(review) => {
            let explanation = inspect(&predictor, &review.to_input(), &limits)?;
            output_result(&explanation, args)?;
        }
        Command::Health => {
            let report = predictor.health();
            output_result(&report, args)?;
            if !report.ready {
                return Ok(EXIT_FAILURE);
            }
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Validate and classify one review.
pub fn predict(
    predictor: &Predictor,
    input: &RawReviewInput,
    limits: &ReviewLimits,
) -> Result<ClassificationResult> {
    input.validate(limits)?;
    ensure_ready(predictor)?;
    predictor.predict(input)
}

/// Validate and explain one review.
pub fn inspect(
    predictor: &Predictor,
    input: &RawReviewInput,
    limits: &ReviewLimits,
) -> Result<Explanation> {
    input.validate(limits)?;
    predictor.explain(input)
}

/// Classify every review in a JSON Lines file.
///
/// Blank lines are skipped. A malformed or invalid line fails the whole
/// batch before anything is classified.
pub fn batch<P: AsRef<Path>>(
    predictor: &Predictor,
    path: P,
    limits: &ReviewLimits,
) -> Result<BatchOutput> {
    let (lines, inputs) = read_reviews(path.as_ref(), limits)?;
    log::info!("Read {} reviews from {}", inputs.len(), path.as_ref().display());

    ensure_ready(predictor)?;
    let results = predictor.predict_batch(&inputs)?;
    let stats = PredictionStats::from_results(&results);

    Ok(BatchOutput {
        results: lines
            .into_iter()
            .zip(results)
            .map(|(line, result)| BatchLine { line, result })
            .collect(),
        stats,
    })
}

/// Read and validate reviews, returning them with their line numbers.
fn read_reviews(path: &Path, limits: &ReviewLimits) -> Result<(Vec<usize>, Vec<RawReviewInput>)> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    let mut inputs = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let input: RawReviewInput = serde_json::from_str(&line).map_err(|e| {
            VeracityError::invalid_argument(format!("line {line_num}: {e}"))
        })?;
        input.validate(limits).map_err(|e| {
            VeracityError::invalid_argument(format!("line {line_num}: {e}"))
        })?;

        lines.push(line_num);
        inputs.push(input);
    }

    Ok((lines, inputs))
}

/// Report the recorded load failure rather than a bare "not loaded".
fn ensure_ready(predictor: &Predictor) -> Result<()> {
    match predictor.classifier().failure() {
        Some(failure) => Err(VeracityError::Artifact(failure)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;
    use crate::ml::model::LinearModel;
    use crate::review::Label;

    fn predictor(dir: &TempDir) -> Predictor {
        let config = VeracityConfig::default().with_model_path(dir.path());
        let weights: HashMap<String, f64> = [("junk".to_string(), -2.0)].into_iter().collect();
        LinearModel::new("cli-test", 1.0, weights)
            .save(config.artifact_path())
            .unwrap();
        Predictor::from_config(&config).unwrap()
    }

    #[test]
    fn test_predict_validates_input() {
        let dir = TempDir::new().unwrap();
        let predictor = predictor(&dir);
        let limits = ReviewLimits::default();

        let ok = predict(&predictor, &RawReviewInput::new("solid", 4, true, "tools"), &limits)
            .unwrap();
        assert_eq!(ok.label, Label::Real);

        let err = predict(&predictor, &RawReviewInput::new("solid", 9, true, "tools"), &limits)
            .unwrap_err();
        assert!(matches!(err, VeracityError::InvalidArgument(_)));
    }

    #[test]
    fn test_predict_reports_load_failure() {
        let dir = TempDir::new().unwrap();
        let config = VeracityConfig::default().with_model_path(dir.path());
        let predictor = Predictor::from_config(&config).unwrap();

        let err = predict(
            &predictor,
            &RawReviewInput::new("solid", 4, true, "tools"),
            &ReviewLimits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, VeracityError::Artifact(_)));
        assert!(err.is_model_unavailable());
    }

    #[test]
    fn test_batch() {
        let dir = TempDir::new().unwrap();
        let predictor = predictor(&dir);

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"text":"solid build","rating":5,"verifiedPurchase":true,"category":"tools"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"text":"junk junk","rating":1,"verifiedPurchase":false,"category":"tools"}}"#).unwrap();

        let output = batch(&predictor, file.path(), &ReviewLimits::default()).unwrap();
        assert_eq!(output.results.len(), 2);
        assert_eq!(output.results[0].line, 1);
        assert_eq!(output.results[0].result.label, Label::Real);
        assert_eq!(output.results[1].line, 3);
        assert_eq!(output.results[1].result.label, Label::Fake);
        assert_eq!(output.stats.total, 2);
        assert_eq!(output.stats.fake, 1);
    }

    #[test]
    fn test_batch_rejects_bad_line() {
        let dir = TempDir::new().unwrap();
        let predictor = predictor(&dir);

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"text":"fine","rating":5,"category":"tools"}}"#).unwrap();
        writeln!(file, "{{not json").unwrap();

        let err = batch(&predictor, file.path(), &ReviewLimits::default()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_inspect_without_model() {
        let dir = TempDir::new().unwrap();
        let config = VeracityConfig::default().with_model_path(dir.path());
        let predictor = Predictor::from_config(&config).unwrap();

        let explanation = inspect(
            &predictor,
            &RawReviewInput::new("Great knives", 5, false, "kitchen"),
            &ReviewLimits::default(),
        )
        .unwrap();
        assert_eq!(explanation.tokens, vec!["great knife", "great", "knife"]);
    }
}
