use anyhow::Result;
use std::path::PathBuf;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::driver::{CancelToken, Driver};
use crate::error::TranslateError;
use crate::fs::OutputSink;
use crate::input::InputReader;
use crate::translation::build_translator;
use crate::ui::{Progress, Style};
use crate::{output, status};

pub struct TranslateOptions {
    pub file: PathBuf,
    pub resolve: ResolveOptions,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let source = InputReader::read(&options.file)?;

    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    let config = resolve_config(&options.resolve, &config_file)?;

    let translator = build_translator(&config.provider);
    let driver = Driver::new(translator, config.driver.clone())?;

    let mut sink = OutputSink::create(&config.output)?;

    if config.driver.payload.empty_lines_setting_ignored() {
        crate::warn!("--send-empty-lines has no effect with --split whole");
    }

    if source.is_empty() {
        crate::warn!("{} is empty; writing an empty output file", options.file.display());
    }

    let cancel = CancelToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    status!(
        "Translating {} to {} via {} ({} chars/request, {} words/request, {} req/s)",
        Style::value(options.file.display()),
        Style::code(&config.driver.target_language),
        driver.translator_name(),
        config.driver.chunk.max_chars,
        config.driver.chunk.max_words,
        config.driver.requests_per_second
    );

    let progress = Progress::new(source.chars().count(), "Translating");
    let result = driver
        .run(&source, &mut sink, &cancel, |report| {
            progress.advance(report.chars);
            if report.attempts > 1 {
                progress.println(&format!(
                    "chunk {} succeeded after {} attempts",
                    report.index, report.attempts
                ));
            }
        })
        .await;
    progress.finish();
    interrupt.abort();

    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            if !matches!(err, TranslateError::Io { .. }) {
                crate::warn!(
                    "partial output kept in {} ({} lines)",
                    sink.partial().display(),
                    sink.lines_written()
                );
            }
            return Err(err.into());
        }
    };

    let path = sink.finish()?;

    status!(
        "{} {} characters in {} chunks ({} requests, {} lines) -> {}",
        Style::success("Translated"),
        summary.chars,
        summary.chunks,
        summary.requests,
        summary.lines,
        Style::value(path.display())
    );
    output::flush_stderr();

    Ok(())
}
