//! Shows where the config file lives and what a run would use.

use anyhow::Result;

use crate::chunker::ChunkSettings;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::ui::Style;

/// Prints the config file path and the effective settings.
///
/// Settings are resolved exactly as a translation run would resolve them,
/// so a missing API key or malformed value is reported here too.
pub fn print_config(options: &ResolveOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let path = manager.config_path();

    println!("{}", Style::header("Configuration"));
    println!(
        "  {} {}{}",
        Style::label("file:"),
        Style::value(path.display()),
        if manager.exists() { "" } else { " (not found, using defaults)" }
    );

    let config_file = manager.load_or_default()?;
    let resolved = resolve_config(options, &config_file)?;
    let driver = &resolved.driver;

    println!();
    println!("{}", Style::header("Effective settings"));
    let rows = [
        ("provider", resolved.provider.name.clone()),
        ("endpoint", resolved.provider.endpoint.clone()),
        ("to", driver.target_language.to_string()),
        ("output", resolved.output.display().to_string()),
        ("max_chars", driver.chunk.max_chars.to_string()),
        ("max_words", driver.chunk.max_words.to_string()),
        ("word_delimiter", format!("{:?}", driver.chunk.word_delimiter)),
        ("boundaries", describe_boundaries(&driver.chunk)),
        ("requests_per_second", driver.requests_per_second.to_string()),
        ("split", driver.payload.split.to_string()),
        ("send_empty_lines", driver.payload.send_empty_lines.to_string()),
        ("max_attempts", driver.retry.max_attempts.to_string()),
    ];
    for (key, value) in rows {
        println!("  {} {}", Style::label(format!("{key:20}")), value);
    }

    Ok(())
}

fn describe_boundaries(settings: &ChunkSettings) -> String {
    settings
        .boundaries
        .iter()
        .map(|c| format!("{c:?}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_boundaries_escapes_newline() {
        let settings = ChunkSettings::default();
        assert_eq!(describe_boundaries(&settings), r"'\n' '.'");
    }
}
