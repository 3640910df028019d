//! The translation loop: chunk, call the service, pace, write.

mod cancel;
mod payload;

pub use cancel::CancelToken;
pub use payload::{Payload, PayloadOptions, SplitMode};

use std::time::Duration;

use crate::chunker::{Chunk, ChunkSettings, Chunker, Cut};
use crate::error::TranslateError;
use crate::fs::OutputSink;
use crate::translation::{LanguageTag, RetryPolicy, Translation, Translator};

/// Default request rate ceiling.
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 10.0;

/// Everything the driver needs besides the translator.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub target_language: LanguageTag,
    pub chunk: ChunkSettings,
    pub payload: PayloadOptions,
    /// Rate ceiling; a fixed pause of `1s / requests_per_second` follows
    /// every remote call.
    pub requests_per_second: f64,
    pub retry: RetryPolicy,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            target_language: LanguageTag::default(),
            chunk: ChunkSettings::default(),
            payload: PayloadOptions::default(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            retry: RetryPolicy::default(),
        }
    }
}

impl DriverOptions {
    /// Pause after each remote call.
    pub fn pacing(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.requests_per_second).unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> Result<(), TranslateError> {
        self.chunk.validate()?;
        if !self.requests_per_second.is_finite() || self.requests_per_second <= 0.0 {
            return Err(TranslateError::InvalidSettings(format!(
                "requests_per_second must be a positive number, got {}",
                self.requests_per_second
            )));
        }
        if Duration::try_from_secs_f64(1.0 / self.requests_per_second).is_err() {
            return Err(TranslateError::InvalidSettings(format!(
                "requests_per_second {} is too low; the pause between requests would overflow",
                self.requests_per_second
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(TranslateError::InvalidSettings(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// What happened to one chunk; passed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkReport {
    /// 1-based chunk number.
    pub index: usize,
    /// Characters consumed by this chunk.
    pub chars: usize,
    /// Lines written for this chunk.
    pub lines: usize,
    /// Remote attempts made (0 for chunks of only empty lines).
    pub attempts: u32,
    pub cut: Cut,
    /// Cursor after this chunk.
    pub cursor: usize,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub chunks: usize,
    pub requests: usize,
    pub lines: usize,
    pub chars: usize,
}

/// Drives a translation run over one source buffer.
///
/// Strictly sequential: one remote call in flight, a fixed pause after
/// each call, output flushed after each chunk.
pub struct Driver {
    translator: Box<dyn Translator>,
    chunker: Chunker,
    options: DriverOptions,
}

impl Driver {
    pub fn new(
        translator: Box<dyn Translator>,
        options: DriverOptions,
    ) -> Result<Self, TranslateError> {
        options.validate()?;
        let chunker = Chunker::new(options.chunk.clone())?;
        Ok(Self {
            translator,
            chunker,
            options,
        })
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    /// Translates `source` into `sink`, calling `on_chunk` after each chunk
    /// is written.
    pub async fn run(
        &self,
        source: &str,
        sink: &mut OutputSink,
        cancel: &CancelToken,
        mut on_chunk: impl FnMut(&ChunkReport),
    ) -> Result<RunSummary, TranslateError> {
        let mut summary = RunSummary::default();
        let mut cursor = 0;

        while cursor < source.len() {
            cancel.check()?;

            let chunk = self.chunker.next_chunk(source, cursor);
            let payload = Payload::build(&chunk, self.options.payload);
            crate::verbose!(
                "chunk {} [{}..{}] {:?}: {:?}",
                summary.chunks + 1,
                chunk.start,
                chunk.end,
                chunk.cut,
                payload.elements()
            );

            let (translations, attempts) = if payload.needs_request() {
                let (translations, attempts) =
                    self.translate_with_retry(payload.elements(), cancel).await?;
                summary.requests += 1;
                cancel.sleep(self.options.pacing()).await?;
                (translations, attempts)
            } else {
                (Vec::new(), 0)
            };

            let lines = payload
                .assemble(translations)
                .map_err(|source| TranslateError::RemoteCall { attempts, source })?;
            sink.write_lines(&lines)?;

            let report = self.report(&chunk, summary.chunks + 1, lines.len(), attempts);
            summary.chunks += 1;
            summary.lines += report.lines;
            summary.chars += report.chars;
            on_chunk(&report);

            cursor = chunk.end;
        }

        Ok(summary)
    }

    async fn translate_with_retry(
        &self,
        elements: &[String],
        cancel: &CancelToken,
    ) -> Result<(Vec<Translation>, u32), TranslateError> {
        let policy = self.options.retry;
        let mut attempt = 1;

        loop {
            match self
                .translator
                .translate(elements, &self.options.target_language)
                .await
            {
                Ok(translations) => return Ok((translations, attempt)),
                Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                    let wait = policy.backoff(attempt);
                    crate::warn!(
                        "{} request failed (attempt {attempt}/{}): {err}; retrying in {wait:?}",
                        self.translator.name(),
                        policy.max_attempts
                    );
                    cancel.sleep(wait).await?;
                    attempt += 1;
                }
                Err(source) => {
                    return Err(TranslateError::RemoteCall {
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }

    fn report(&self, chunk: &Chunk<'_>, index: usize, lines: usize, attempts: u32) -> ChunkReport {
        if matches!(chunk.cut, Cut::WordDelimiter | Cut::Hard) {
            crate::verbose!(
                "chunk {index} has no boundary within {} chars; cut at {:?}",
                self.options.chunk.max_chars,
                chunk.cut
            );
        }
        ChunkReport {
            index,
            chars: chunk.char_count(),
            lines,
            attempts,
            cut: chunk.cut,
            cursor: chunk.end,
        }
    }
}
