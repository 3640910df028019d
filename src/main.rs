use clap::{CommandFactory, Parser};

use chunk_translate::cli::commands::{config, providers, translate};
use chunk_translate::cli::{Args, Command};
use chunk_translate::config::ResolveOptions;
use chunk_translate::error::TranslateError;
use chunk_translate::output::{self, OutputConfig};
use chunk_translate::translation::print_languages;
use chunk_translate::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        no_color: args.no_color || std::env::var("NO_COLOR").is_ok(),
    });

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let resolve = ResolveOptions {
        to: args.to,
        provider: args.provider,
        output: args.output,
        max_chars: args.max_chars,
        max_words: args.max_words,
        requests_per_second: args.requests_per_second,
        split: args.split,
        send_empty_lines: args.send_empty_lines,
    };

    match args.command {
        Some(Command::Languages) => print_languages(),
        Some(Command::Providers { provider }) => providers::print_providers(provider.as_deref())?,
        Some(Command::Config) => config::print_config(&resolve)?,
        None => {
            let Some(file) = args.file else {
                Args::command().print_help()?;
                return Ok(());
            };
            translate::run_translate(translate::TranslateOptions { file, resolve }).await?;
        }
    }

    Ok(())
}

/// Exit code for the root cause of `err`.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TranslateError>())
        .map_or(exitcode::CONFIG, TranslateError::exit_code)
}
