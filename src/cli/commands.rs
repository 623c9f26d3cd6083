//! Command implementations for the Sentiscope CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::analysis::normalizer::CommentNormalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SentiscopeConfig;
use crate::error::{Result, SentiscopeError};
use crate::ml::model::SentimentModel;
use crate::server;

/// Execute a CLI command.
pub fn execute_command(args: SentiscopeArgs) -> Result<()> {
    let config = args.load_config()?;

    match &args.command {
        Command::Normalize(normalize_args) => normalize_comments(normalize_args, config, &args),
        Command::Predict(predict_args) => predict_comments(predict_args, config, &args),
        Command::Serve(serve_args) => serve_model(serve_args, config),
    }
}

/// Print the normalized form of each comment.
fn normalize_comments(
    args: &NormalizeArgs,
    mut config: SentiscopeConfig,
    cli_args: &SentiscopeArgs,
) -> Result<()> {
    if let Some(separator) = &args.emoticon_separator {
        config.normalizer.emoticon_separator = separator.clone();
    }

    let normalizer = CommentNormalizer::from_config(&config.normalizer)?;
    let comments = read_comments(&args.input)?;

    let results: Vec<NormalizedComment> = comments
        .into_iter()
        .map(|comment| NormalizedComment {
            normalized: normalizer.normalize(&comment),
            comment,
        })
        .collect();

    output_results(&results, cli_args)
}

/// Load the model and print a prediction for each comment.
fn predict_comments(
    args: &PredictArgs,
    config: SentiscopeConfig,
    cli_args: &SentiscopeArgs,
) -> Result<()> {
    let model = SentimentModel::load(&predict_config(args, config))?;

    // A single comment on the command line fails the command when blank.
    if let Some(text) = &args.input.text {
        let prediction = model.predict(text)?;
        let record = PredictionRecord {
            comment: text.clone(),
            prediction: Some(prediction),
            error: None,
        };
        return output_results(&[record], cli_args);
    }

    let comments: Vec<String> = read_comments(&args.input)?
        .into_iter()
        .filter(|comment| !comment.trim().is_empty())
        .collect();
    log::info!("Predicting sentiment for {} comments", comments.len());

    let records: Vec<PredictionRecord> = comments
        .iter()
        .zip(model.predict_batch(comments.as_slice()))
        .map(|(comment, result)| match result {
            Ok(prediction) => PredictionRecord {
                comment: comment.clone(),
                prediction: Some(prediction),
                error: None,
            },
            Err(e) => {
                log::warn!("Failed to classify {comment:?}: {e}");
                PredictionRecord {
                    comment: comment.clone(),
                    prediction: None,
                    error: Some(e.user_message()),
                }
            }
        })
        .collect();

    output_results(&records, cli_args)
}

/// Apply the predict flags on top of the loaded configuration.
fn predict_config(args: &PredictArgs, mut config: SentiscopeConfig) -> SentiscopeConfig {
    if let Some(model_dir) = &args.model_dir {
        config.model.model_dir = model_dir.clone();
    }
    if let Some(separator) = &args.emoticon_separator {
        config.normalizer.emoticon_separator = separator.clone();
    }
    config
}

/// Load the model and serve it until the process is stopped.
fn serve_model(args: &ServeArgs, mut config: SentiscopeConfig) -> Result<()> {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(model_dir) = &args.model_dir {
        config.model.model_dir = model_dir.clone();
    }

    let model = Arc::new(SentimentModel::load(&config)?);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(model, &config.server))
}

/// Read the comments named by `input`: the TEXT argument, a file, or stdin.
fn read_comments(input: &CommentInput) -> Result<Vec<String>> {
    if let Some(text) = &input.text {
        return Ok(vec![text.clone()]);
    }

    match input.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open comment file {}", path.display()))?;
            read_lines(BufReader::new(file))
        }
        _ => read_lines(io::stdin().lock()),
    }
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .map(|line| line.map_err(SentiscopeError::from))
        .collect()
}
