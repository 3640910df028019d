//! # chunk-translate
//!
//! Translates a text file through a remote translation API. The file is cut
//! into chunks that respect the API's per-request limits (characters and
//! words), each chunk is sent as one request, and the translated lines are
//! appended to an output file, with a fixed pause between requests to stay
//! under the API's rate ceiling.
//!
//! ## Quick Start
//!
//! ```bash
//! export GOOGLE_TRANSLATE_API_KEY=...
//!
//! # Translate a file to Traditional Chinese (writes out.txt)
//! translate ./notes.txt
//!
//! # Override target language and limits
//! translate --to ja --max-chars 5000 --rps 5 ./notes.txt
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/chunk-translate/config.toml`:
//!
//! ```toml
//! [translate]
//! to = "zh-TW"
//! max_chars = 2000
//! max_words = 128
//! requests_per_second = 10.0
//!
//! [providers.google]
//! api_key_env = "GOOGLE_TRANSLATE_API_KEY"
//! ```

/// Chunk-boundary computation.
pub mod chunker;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// The chunk / translate / write loop.
pub mod driver;

/// Error types.
pub mod error;

/// Output file handling.
pub mod fs;

/// Input reading from files.
pub mod input;

/// Global output configuration (quiet, verbose, colors).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Translation providers.
pub mod translation;

/// Terminal UI components (progress bar, colors).
pub mod ui;
