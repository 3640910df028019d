mod google;
mod language;
mod provider;
mod retry;

pub use google::{DEFAULT_ENDPOINT, GoogleTranslator};
pub use language::{COMMON_LANGUAGES, DEFAULT_TARGET_LANGUAGE, LanguageTag, print_languages};
pub use provider::{
    ProviderKind, ProviderSettings, RemoteError, Translation, Translator, build_translator,
};
pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryPolicy};
