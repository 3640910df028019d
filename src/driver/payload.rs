//! Mapping between a chunk, the request sent for it, and the lines written
//! back out.

use serde::{Deserialize, Serialize};

use crate::chunker::Chunk;
use crate::translation::{RemoteError, Translation};

/// How a chunk is turned into request elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// One element per line of the chunk.
    #[default]
    Lines,
    /// The whole chunk as a single element.
    Whole,
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lines => write!(f, "lines"),
            Self::Whole => write!(f, "whole"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadOptions {
    pub split: SplitMode,
    /// Send empty lines to the service instead of filling them in locally.
    ///
    /// Only meaningful with [`SplitMode::Lines`]; a whole chunk is always
    /// sent as-is, empty lines included.
    pub send_empty_lines: bool,
}

impl PayloadOptions {
    /// Whether `send_empty_lines` is set but has no effect.
    pub const fn empty_lines_setting_ignored(&self) -> bool {
        self.send_empty_lines && matches!(self.split, SplitMode::Whole)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// An empty line written without asking the service.
    Blank,
    /// The translation at this index of the response.
    Remote(usize),
}

/// Request elements for one chunk plus the layout to rebuild its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    elements: Vec<String>,
    layout: Vec<Slot>,
    split: SplitMode,
}

impl Payload {
    pub fn build(chunk: &Chunk<'_>, options: PayloadOptions) -> Self {
        match options.split {
            SplitMode::Whole => Self {
                elements: vec![chunk.text.to_string()],
                layout: vec![Slot::Remote(0)],
                split: SplitMode::Whole,
            },
            SplitMode::Lines => {
                let mut elements = Vec::new();
                let mut layout = Vec::new();
                for line in chunk.lines() {
                    if line.is_empty() && !options.send_empty_lines {
                        layout.push(Slot::Blank);
                    } else {
                        layout.push(Slot::Remote(elements.len()));
                        elements.push(line.to_string());
                    }
                }
                Self {
                    elements,
                    layout,
                    split: SplitMode::Lines,
                }
            }
        }
    }

    /// Strings to submit to the translation service.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Whether the chunk needs a remote call at all.
    pub fn needs_request(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Places translations back into the chunk's line layout.
    pub fn assemble(&self, translations: Vec<Translation>) -> Result<Vec<String>, RemoteError> {
        if translations.len() != self.elements.len() {
            return Err(RemoteError::CountMismatch {
                expected: self.elements.len(),
                received: translations.len(),
            });
        }

        let mut texts: Vec<Option<String>> =
            translations.into_iter().map(|t| Some(t.text)).collect();

        let lines = self
            .layout
            .iter()
            .map(|slot| match slot {
                Slot::Blank => String::new(),
                Slot::Remote(i) => {
                    let text = texts[*i].take().unwrap_or_default();
                    match self.split {
                        SplitMode::Whole => text
                            .strip_suffix('\n')
                            .map(str::to_string)
                            .unwrap_or(text),
                        SplitMode::Lines => text,
                    }
                }
            })
            .collect();

        Ok(lines)
    }
}
