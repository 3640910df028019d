//! Configuration file management and provider settings.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_PROVIDER, ProviderConfig,
    ResolveOptions, ResolvedConfig, TranslateConfig, resolve_config,
};
