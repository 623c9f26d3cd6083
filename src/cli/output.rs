//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, SentiscopeArgs};
use crate::error::Result;
use crate::ml::types::Prediction;

/// One normalized comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedComment {
    pub comment: String,
    pub normalized: String,
}

/// One comment and its prediction, or the reason it could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub comment: String,
    #[serde(flatten)]
    pub prediction: Option<Prediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Plain-text rendering used by the `human` output format.
pub trait HumanReadable {
    fn to_human(&self, verbosity: u8) -> String;
}

impl HumanReadable for NormalizedComment {
    fn to_human(&self, verbosity: u8) -> String {
        if verbosity > 1 {
            format!("{} => {}", self.comment, self.normalized)
        } else {
            self.normalized.clone()
        }
    }
}

impl HumanReadable for PredictionRecord {
    fn to_human(&self, verbosity: u8) -> String {
        match (&self.prediction, &self.error) {
            (Some(prediction), _) if verbosity > 1 => format!(
                "{} [class {}, normalized {:?}]",
                prediction.message, prediction.class, prediction.normalized
            ),
            (Some(prediction), _) => prediction.message.clone(),
            (None, Some(error)) => format!("error: {error}"),
            (None, None) => String::new(),
        }
    }
}

/// Output a list of results in the specified format.
pub fn output_results<T>(results: &[T], args: &SentiscopeArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => output_human(results, args),
        OutputFormat::Json => output_json(results, args),
    }
}

fn output_human<T: HumanReadable>(results: &[T], args: &SentiscopeArgs) -> Result<()> {
    let verbosity = args.verbosity();
    for result in results {
        println!("{}", result.to_human(verbosity));
    }
    Ok(())
}

/// Output in JSON format. A single result is printed as an object, several
/// as an array.
fn output_json<T: Serialize>(results: &[T], args: &SentiscopeArgs) -> Result<()> {
    let json = match results {
        [single] if args.pretty => serde_json::to_string_pretty(single)?,
        [single] => serde_json::to_string(single)?,
        _ if args.pretty => serde_json::to_string_pretty(results)?,
        _ => serde_json::to_string(results)?,
    };

    println!("{json}");
    Ok(())
}
