//! Target language tags.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ui::Style;

/// Default target language.
pub const DEFAULT_TARGET_LANGUAGE: &str = "zh-TW";

/// Common language tags accepted by the translation service and their names.
pub const COMMON_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fil", "Filipino"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sv", "Swedish"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// A syntactically valid BCP-47 language tag, e.g. `zh-TW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parses a tag of the form `language[-subtag]*`.
    ///
    /// The primary subtag is 2-8 ASCII letters; later subtags are 1-8 ASCII
    /// alphanumerics. Case is preserved.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut subtags = tag.split('-');
        let primary = subtags.next().unwrap_or_default();

        let primary_ok =
            (2..=8).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
        let rest_ok = subtags.all(|s| {
            (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if primary_ok && rest_ok {
            Ok(Self(tag.to_string()))
        } else {
            anyhow::bail!(
                "Invalid language code: '{tag}'\n\n\
                 Expected a BCP-47 tag such as zh-TW, ja, en, pt-PT.\n\
                 Run 'translate languages' to see common codes."
            )
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self(DEFAULT_TARGET_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

/// Prints the common language tags to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Common language tags (BCP-47)"));
    for (code, name) in COMMON_LANGUAGES {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
    println!();
    println!(
        "{}",
        Style::hint("Any tag supported by the translation service is accepted.")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tags() {
        assert!(LanguageTag::parse("ja").is_ok());
        assert!(LanguageTag::parse("en").is_ok());
        assert!(LanguageTag::parse("zh-TW").is_ok());
        assert!(LanguageTag::parse("sr-Latn-RS").is_ok());
        assert!(LanguageTag::parse("fil").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_tags() {
        assert!(LanguageTag::parse("").is_err());
        assert!(LanguageTag::parse("x").is_err());
        assert!(LanguageTag::parse("zh_TW").is_err());
        assert!(LanguageTag::parse("zh-").is_err());
        assert!(LanguageTag::parse("invalid_lang_xyz").is_err());
        assert!(LanguageTag::parse("12").is_err());
    }

    #[test]
    fn test_common_languages_are_valid_tags() {
        for (code, _) in COMMON_LANGUAGES {
            assert!(LanguageTag::parse(code).is_ok(), "{code}");
        }
    }

    #[test]
    fn test_default_tag() {
        assert_eq!(LanguageTag::default().as_str(), "zh-TW");
    }

    #[test]
    fn test_deserialize_rejects_invalid_tag() {
        let ok: Result<LanguageTag, _> = serde_json::from_str("\"ja\"");
        assert!(ok.is_ok());
        let bad: Result<LanguageTag, _> = serde_json::from_str("\"not a tag\"");
        assert!(bad.is_err());
    }
}
