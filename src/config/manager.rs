use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::chunker::{
    ChunkSettings, DEFAULT_BOUNDARIES, DEFAULT_MAX_CHARS, DEFAULT_MAX_WORDS,
    DEFAULT_WORD_DELIMITER,
};
use crate::driver::{DEFAULT_REQUESTS_PER_SECOND, DriverOptions, PayloadOptions, SplitMode};
use crate::fs::DEFAULT_OUTPUT;
use crate::paths;
use crate::translation::{
    DEFAULT_ENDPOINT, DEFAULT_MAX_ATTEMPTS, DEFAULT_TARGET_LANGUAGE, LanguageTag, ProviderKind,
    ProviderSettings, RetryPolicy,
};

/// Name of the provider that exists without any configuration.
pub const DEFAULT_PROVIDER: &str = "google";

/// Environment variable read for the built-in provider's API key.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

/// Default settings in the `[translate]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranslateConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default target language (BCP-47 tag).
    pub to: Option<String>,
    /// Output file path.
    pub output: Option<PathBuf>,
    /// Request character ceiling.
    pub max_chars: Option<usize>,
    /// Per-request word ceiling.
    pub max_words: Option<usize>,
    /// Rate ceiling in requests per second.
    pub requests_per_second: Option<f64>,
    /// Character separating words.
    pub word_delimiter: Option<char>,
    /// Characters a chunk may end on, e.g. `"\n."`.
    pub boundaries: Option<String>,
    /// Request layout: `lines` or `whole`.
    pub split: Option<SplitMode>,
    /// Send empty lines to the service instead of filling them in locally.
    pub send_empty_lines: Option<bool>,
    /// Attempts per request, including the first.
    pub max_attempts: Option<u32>,
}

/// Configuration for a translation provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Back end implementation.
    #[serde(default)]
    pub kind: ProviderKind,
    /// API endpoint URL; the kind's default when absent.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Model hint passed to the service.
    #[serde(default)]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// The provider used when nothing is configured.
    pub fn builtin() -> Self {
        Self {
            kind: ProviderKind::Google,
            endpoint: None,
            api_key: None,
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            model: None,
        }
    }

    /// Environment variable consulted for the API key.
    pub fn key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Gets the API key, preferring the environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(self.key_env())
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }

    pub fn endpoint(&self) -> &str {
        match self.kind {
            ProviderKind::Google => self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
        }
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/chunk-translate/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub translate: TranslateConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl ConfigFile {
    /// Looks up a provider, falling back to the built-in one for its name.
    pub fn provider(&self, name: &str) -> Option<ProviderConfig> {
        self.providers.get(name).cloned().or_else(|| {
            (name == DEFAULT_PROVIDER).then(ProviderConfig::builtin)
        })
    }

    /// Names of all usable providers, sorted, built-in included.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        if !self.providers.contains_key(DEFAULT_PROVIDER) {
            names.push(DEFAULT_PROVIDER.to_string());
        }
        names.sort();
        names
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: ProviderSettings,
    pub output: PathBuf,
    pub driver: DriverOptions,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub to: Option<String>,
    pub provider: Option<String>,
    pub output: Option<PathBuf>,
    pub max_chars: Option<usize>,
    pub max_words: Option<usize>,
    pub requests_per_second: Option<f64>,
    pub split: Option<SplitMode>,
    /// `true` forces empty lines to be sent; `false` defers to the file.
    pub send_empty_lines: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI options, then the config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if the provider is unknown, its API key is missing, the
/// target language is malformed, or the limits cannot make progress.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let section = &config_file.translate;

    let to = options
        .to
        .as_deref()
        .or(section.to.as_deref())
        .unwrap_or(DEFAULT_TARGET_LANGUAGE);
    let target_language = LanguageTag::parse(to)?;

    let provider_name = options
        .provider
        .as_ref()
        .or(section.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let provider_config = config_file.provider(&provider_name).ok_or_else(|| {
        anyhow::anyhow!(
            "Provider '{provider_name}' not found\n\n\
             Available providers:\n  \
             - {}\n\n\
             Add providers to ~/.config/chunk-translate/config.toml",
            config_file.provider_names().join("\n  - ")
        )
    })?;

    let Some(api_key) = provider_config.get_api_key() else {
        let env_var = provider_config.key_env();
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/chunk-translate/config.toml"
        );
    };

    let chunk = ChunkSettings {
        max_chars: options
            .max_chars
            .or(section.max_chars)
            .unwrap_or(DEFAULT_MAX_CHARS),
        max_words: options
            .max_words
            .or(section.max_words)
            .unwrap_or(DEFAULT_MAX_WORDS),
        word_delimiter: section.word_delimiter.unwrap_or(DEFAULT_WORD_DELIMITER),
        boundaries: section
            .boundaries
            .as_deref()
            .unwrap_or(DEFAULT_BOUNDARIES)
            .chars()
            .collect(),
    };

    let driver = DriverOptions {
        target_language,
        chunk,
        payload: PayloadOptions {
            split: options.split.or(section.split).unwrap_or_default(),
            send_empty_lines: options.send_empty_lines
                || section.send_empty_lines.unwrap_or(false),
        },
        requests_per_second: options
            .requests_per_second
            .or(section.requests_per_second)
            .unwrap_or(DEFAULT_REQUESTS_PER_SECOND),
        retry: RetryPolicy {
            max_attempts: section.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            ..RetryPolicy::default()
        },
    };
    driver.validate()?;

    let output = options
        .output
        .as_ref()
        .or(section.output.as_ref())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    Ok(ResolvedConfig {
        provider: ProviderSettings {
            endpoint: provider_config.endpoint().to_string(),
            kind: provider_config.kind,
            model: provider_config.model.clone(),
            name: provider_name,
            api_key,
        },
        output,
        driver,
    })
}

/// Locates and loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/chunk-translate/config.toml`
    /// or `~/.config/chunk-translate/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.is_file()
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(config_file)
    }

    /// Loads the config file, or defaults when it does not exist.
    ///
    /// A file that exists but cannot be parsed is an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
