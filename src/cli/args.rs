use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::driver::SplitMode;

#[derive(Parser, Debug)]
#[command(name = "translate")]
#[command(about = "Translate a text file in API-sized chunks")]
#[command(version)]
pub struct Args {
    /// File to translate
    pub file: Option<PathBuf>,

    /// Target language (BCP-47 tag, e.g., zh-TW, ja, en)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Output file (default: out.txt)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Provider name from config (default: google)
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Maximum characters per request
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Maximum words per request
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Maximum requests per second
    #[arg(long = "rps")]
    pub requests_per_second: Option<f64>,

    /// Request layout: one element per line, or the whole chunk
    #[arg(long, value_enum)]
    pub split: Option<SplitMode>,

    /// Send empty lines to the service instead of keeping them locally (--split lines only)
    #[arg(long)]
    pub send_empty_lines: bool,

    /// Suppress progress and status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Print each chunk's request lines
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List common language tags
    Languages,
    /// List configured translation providers
    Providers {
        /// Provider name to show details for
        provider: Option<String>,
    },
    /// Show the config file location and effective settings
    Config,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_and_overrides() {
        let args = Args::try_parse_from([
            "translate",
            "--to",
            "ja",
            "--max-chars",
            "7000",
            "--rps",
            "2.5",
            "--split",
            "whole",
            "notes.txt",
        ])
        .unwrap();

        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.to.as_deref(), Some("ja"));
        assert_eq!(args.max_chars, Some(7000));
        assert_eq!(args.requests_per_second, Some(2.5));
        assert_eq!(args.split, Some(SplitMode::Whole));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_without_file() {
        let args = Args::try_parse_from(["translate"]).unwrap();
        assert!(args.file.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_parse_subcommand() {
        let args = Args::try_parse_from(["translate", "languages"]).unwrap();
        assert!(matches!(args.command, Some(Command::Languages)));
    }

    #[test]
    fn test_reject_unknown_split_mode() {
        assert!(Args::try_parse_from(["translate", "--split", "words", "a.txt"]).is_err());
    }
}
