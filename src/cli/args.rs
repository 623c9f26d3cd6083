//! Command line argument parsing for the Sentiscope CLI using clap.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::SentiscopeConfig;
use crate::error::Result;

/// Sentiscope - comment normalization and sentiment prediction
#[derive(Parser, Debug, Clone)]
#[command(name = "sentiscope")]
#[command(about = "Normalize comments and predict their sentiment")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SentiscopeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (JSON)
    #[arg(short, long, env = "SENTISCOPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentiscopeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    /// Load the configuration file, or defaults when none is given.
    pub fn load_config(&self) -> Result<SentiscopeConfig> {
        SentiscopeConfig::load(self.config.as_deref())
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the normalized form of comments
    Normalize(NormalizeArgs),

    /// Predict the sentiment of comments
    Predict(PredictArgs),

    /// Serve the model over HTTP
    Serve(ServeArgs),
}

/// Where comments are read from. Without TEXT or `--input`, one comment
/// per line is read from stdin.
#[derive(Parser, Debug, Clone, Default)]
pub struct CommentInput {
    /// Comment text
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// File with one comment per line ("-" for stdin)
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,
}

/// Arguments for normalizing comments
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: CommentInput,

    /// String placed between consecutive emoticons
    #[arg(long, value_name = "SEP")]
    pub emoticon_separator: Option<String>,
}

/// Arguments for predicting sentiment
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub input: CommentInput,

    /// Directory holding the vectorizer and classifier artifacts
    #[arg(short, long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// String placed between consecutive emoticons
    #[arg(long, value_name = "SEP")]
    pub emoticon_separator: Option<String>,
}

/// Arguments for the HTTP server
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding the vectorizer and classifier artifacts
    #[arg(short, long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl CommentInput {
    /// True when comments come from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.text.is_none() && self.input.as_deref().is_none_or(|path| path == Path::new("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_normalize_command() {
        let args = SentiscopeArgs::try_parse_from([
            "sentiscope",
            "normalize",
            "I love this!! :)",
            "--emoticon-separator",
            " ",
        ])
        .unwrap();

        if let Command::Normalize(normalize_args) = args.command {
            assert_eq!(normalize_args.input.text.as_deref(), Some("I love this!! :)"));
            assert_eq!(normalize_args.emoticon_separator.as_deref(), Some(" "));
            assert!(!normalize_args.input.reads_stdin());
        } else {
            panic!("Expected Normalize command");
        }
    }

    #[test]
    fn test_predict_command() {
        let args = SentiscopeArgs::try_parse_from([
            "sentiscope",
            "predict",
            "--input",
            "comments.txt",
            "--model-dir",
            "/srv/model",
            "--emoticon-separator",
            " ",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.input.input, Some(PathBuf::from("comments.txt")));
            assert_eq!(predict_args.model_dir, Some(PathBuf::from("/srv/model")));
            assert_eq!(predict_args.emoticon_separator.as_deref(), Some(" "));
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_text_conflicts_with_input() {
        let result = SentiscopeArgs::try_parse_from([
            "sentiscope",
            "predict",
            "great",
            "--input",
            "comments.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stdin_input() {
        let args = SentiscopeArgs::try_parse_from(["sentiscope", "normalize"]).unwrap();
        if let Command::Normalize(normalize_args) = args.command {
            assert!(normalize_args.input.reads_stdin());
        } else {
            panic!("Expected Normalize command");
        }

        let dash = CommentInput {
            text: None,
            input: Some(PathBuf::from("-")),
        };
        assert!(dash.reads_stdin());
    }

    #[test]
    fn test_serve_command() {
        let args =
            SentiscopeArgs::try_parse_from(["sentiscope", "serve", "--port", "8080"]).unwrap();

        if let Command::Serve(serve_args) = args.command {
            assert_eq!(serve_args.port, Some(8080));
            assert_eq!(serve_args.host, None);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SentiscopeArgs::try_parse_from(["sentiscope", "normalize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SentiscopeArgs::try_parse_from(["sentiscope", "-vvv", "normalize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args =
            SentiscopeArgs::try_parse_from(["sentiscope", "normalize", "x", "-q", "-vv"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_config_flag() {
        let args = SentiscopeArgs::try_parse_from([
            "sentiscope",
            "--config",
            "sentiscope.json",
            "serve",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("sentiscope.json")));
    }
}
