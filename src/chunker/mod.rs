//! Chunk-boundary computation.
//!
//! A [`Chunker`] walks a source buffer and hands out slices that fit a
//! translation API's per-request limits: at most `max_chars` characters and
//! at most `max_words` words. Slices end at the latest boundary character
//! (newline or period by default) inside the limit window, so requests do
//! not split a line or sentence unless nothing else fits.

use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

/// Default request character ceiling.
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Default per-request word ceiling.
pub const DEFAULT_MAX_WORDS: usize = 128;

/// Default word delimiter.
pub const DEFAULT_WORD_DELIMITER: char = ' ';

/// Default boundary characters.
pub const DEFAULT_BOUNDARIES: &str = "\n.";

/// Limits and delimiters used to cut a buffer into chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSettings {
    /// Maximum characters (Unicode scalar values) per chunk.
    pub max_chars: usize,
    /// Maximum words per chunk.
    pub max_words: usize,
    /// Character separating words.
    pub word_delimiter: char,
    /// Characters a chunk may end on.
    pub boundaries: Vec<char>,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            max_words: DEFAULT_MAX_WORDS,
            word_delimiter: DEFAULT_WORD_DELIMITER,
            boundaries: DEFAULT_BOUNDARIES.chars().collect(),
        }
    }
}

impl ChunkSettings {
    /// Checks that the settings can always make progress.
    pub fn validate(&self) -> Result<(), TranslateError> {
        if self.max_chars == 0 {
            return Err(TranslateError::InvalidSettings(
                "max_chars must be at least 1".to_string(),
            ));
        }
        if self.max_words == 0 {
            return Err(TranslateError::InvalidSettings(
                "max_words must be at least 1".to_string(),
            ));
        }
        if self.boundaries.is_empty() {
            return Err(TranslateError::InvalidSettings(
                "at least one boundary character is required".to_string(),
            ));
        }
        if self.boundaries.contains(&self.word_delimiter) {
            return Err(TranslateError::InvalidSettings(format!(
                "word delimiter {:?} cannot also be a boundary character",
                self.word_delimiter
            )));
        }
        Ok(())
    }
}

/// Which rule decided where a chunk ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cut {
    /// The chunk is the rest of the buffer.
    Terminal,
    /// The chunk ends just after a boundary character.
    Boundary,
    /// No boundary in the window; the chunk ends after the last word delimiter.
    WordDelimiter,
    /// Neither a boundary nor a delimiter in the window; cut at the limit.
    Hard,
}

/// A contiguous slice of the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// The chunk text, `buffer[start..end]`.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the chunk; the next cursor.
    pub end: usize,
    pub cut: Cut,
}

impl<'a> Chunk<'a> {
    /// Splits the chunk into lines.
    ///
    /// Interior empty lines are kept as empty strings; a trailing newline
    /// terminates the last line instead of starting a new one.
    pub fn lines(&self) -> Vec<&'a str> {
        self.text.split_terminator('\n').collect()
    }

    /// Number of characters in the chunk.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self.cut, Cut::Terminal)
    }
}

/// Computes chunk boundaries for a buffer.
#[derive(Debug, Clone)]
pub struct Chunker {
    settings: ChunkSettings,
}

impl Chunker {
    pub fn new(settings: ChunkSettings) -> Result<Self, TranslateError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Returns the chunk starting at `cursor`.
    ///
    /// `cursor` must be a char boundary strictly inside `buffer`. The
    /// returned chunk is never empty, so `chunk.end > cursor`.
    pub fn next_chunk<'a>(&self, buffer: &'a str, cursor: usize) -> Chunk<'a> {
        debug_assert!(cursor < buffer.len(), "cursor past end of buffer");
        debug_assert!(buffer.is_char_boundary(cursor));

        let rest = &buffer[cursor..];
        let limit = self.window_end(rest);

        if limit >= rest.len() {
            return Chunk {
                text: rest,
                start: cursor,
                end: buffer.len(),
                cut: Cut::Terminal,
            };
        }

        let window = &rest[..limit];
        let (len, cut) = if let Some(end) = last_after(window, |c| self.is_boundary(c)) {
            (end, Cut::Boundary)
        } else if let Some(end) = last_after(window, |c| c == self.settings.word_delimiter) {
            (end, Cut::WordDelimiter)
        } else {
            (limit, Cut::Hard)
        };

        Chunk {
            text: &rest[..len],
            start: cursor,
            end: cursor + len,
            cut,
        }
    }

    /// Iterates over every chunk of `buffer`, from the start to the end.
    pub fn chunks<'c, 'a>(&'c self, buffer: &'a str) -> Chunks<'c, 'a> {
        Chunks {
            chunker: self,
            buffer,
            cursor: 0,
        }
    }

    /// Counts words in `text` as runs of non-delimiter characters.
    pub fn count_words(&self, text: &str) -> usize {
        text.split(self.settings.word_delimiter)
            .filter(|word| !word.is_empty())
            .count()
    }

    fn is_boundary(&self, c: char) -> bool {
        self.settings.boundaries.contains(&c)
    }

    /// Byte length of the longest prefix of `rest` within both limits.
    fn window_end(&self, rest: &str) -> usize {
        let mut chars = 0;
        let mut words = 0;
        let mut in_word = false;

        for (i, c) in rest.char_indices() {
            if chars == self.settings.max_chars {
                return i;
            }
            if c == self.settings.word_delimiter {
                in_word = false;
            } else if !in_word {
                in_word = true;
                words += 1;
                if words > self.settings.max_words {
                    return i;
                }
            }
            chars += 1;
        }

        rest.len()
    }
}

/// Byte offset just past the last character of `text` matching `pred`.
fn last_after(text: &str, pred: impl Fn(char) -> bool) -> Option<usize> {
    text.char_indices()
        .rev()
        .find(|&(_, c)| pred(c))
        .map(|(i, c)| i + c.len_utf8())
}

/// Iterator returned by [`Chunker::chunks`].
pub struct Chunks<'c, 'a> {
    chunker: &'c Chunker,
    buffer: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Chunks<'_, 'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.buffer.len() {
            return None;
        }
        let chunk = self.chunker.next_chunk(self.buffer, self.cursor);
        self.cursor = chunk.end;
        Some(chunk)
    }
}
