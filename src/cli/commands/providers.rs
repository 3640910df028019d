//! Provider listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager, DEFAULT_PROVIDER, ProviderConfig};
use crate::ui::Style;

/// Prints translation providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists every provider, the built-in one included.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    let default_provider = config
        .translate
        .provider
        .as_deref()
        .unwrap_or(DEFAULT_PROVIDER);

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.provider(provider_name) else {
            anyhow::bail!("Provider '{provider_name}' not found");
        };
        print_provider(provider_name, &provider, default_provider == provider_name);
    } else {
        println!("{}\n", Style::header("Translation providers"));
        for name in config.provider_names() {
            if let Some(provider) = config.provider(&name) {
                print_provider(&name, &provider, default_provider == name);
            }
        }
        print_config_hint(&config);
    }

    Ok(())
}

fn print_provider(name: &str, provider: &ProviderConfig, is_default: bool) {
    println!(
        "  {}{}",
        Style::value(name),
        if is_default { " (default)" } else { "" }
    );
    println!("    {}     {}", Style::label("kind:"), provider.kind);
    println!("    {} {}", Style::label("endpoint:"), provider.endpoint());
    if let Some(model) = &provider.model {
        println!("    {}    {model}", Style::label("model:"));
    }
    let key_state = if provider.get_api_key().is_some() {
        "(set)"
    } else {
        "(not set)"
    };
    println!(
        "    {}  {key_state} via {}",
        Style::label("api key:"),
        provider.key_env()
    );
}

fn print_config_hint(config: &ConfigFile) {
    if config.providers.is_empty() {
        println!();
        println!(
            "{}",
            Style::hint("Add providers to ~/.config/chunk-translate/config.toml")
        );
    }
}
