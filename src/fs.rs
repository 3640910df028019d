//! Output file handling.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::TranslateError;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "out.txt";

/// Returns the in-progress path for `target`: `.{file_name}.partial` in the
/// same directory, so the final rename stays on one filesystem.
pub fn partial_path(target: &Path) -> PathBuf {
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let file_name = target.file_name().unwrap_or_default().to_string_lossy();
    parent.join(format!(".{file_name}.partial"))
}

/// Append-only sink for translated lines.
///
/// Lines are written to a partial file and flushed to disk after every
/// batch. [`OutputSink::finish`] renames the partial file to the target
/// path; a run that fails or is interrupted leaves only the partial file,
/// so the target path exists only for complete runs.
pub struct OutputSink {
    target: PathBuf,
    partial: PathBuf,
    writer: BufWriter<File>,
    lines_written: usize,
}

impl OutputSink {
    /// Creates a fresh sink, removing any previous output at `target`.
    pub fn create(target: impl Into<PathBuf>) -> Result<Self, TranslateError> {
        let target = target.into();
        let partial = partial_path(&target);

        match fs::remove_file(&target) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(TranslateError::io(
                    format!("Failed to remove previous output {}", target.display()),
                    e,
                ));
            }
        }

        let file = File::create(&partial).map_err(|e| {
            TranslateError::io(
                format!("Failed to create output file {}", partial.display()),
                e,
            )
        })?;

        Ok(Self {
            target,
            partial,
            writer: BufWriter::new(file),
            lines_written: 0,
        })
    }

    /// Appends each line followed by a newline, then flushes and syncs.
    pub fn write_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<(), TranslateError> {
        for line in lines {
            self.writer
                .write_all(line.as_ref().as_bytes())
                .and_then(|()| self.writer.write_all(b"\n"))
                .map_err(|e| self.write_error(e))?;
        }
        self.lines_written += lines.len();
        self.sync()
    }

    /// Durably persists everything written so far.
    pub fn sync(&mut self) -> Result<(), TranslateError> {
        self.writer.flush().map_err(|e| self.write_error(e))?;
        self.writer
            .get_ref()
            .sync_data()
            .map_err(|e| self.write_error(e))
    }

    pub const fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn partial(&self) -> &Path {
        &self.partial
    }

    /// Closes the sink and moves the output to its final path.
    pub fn finish(mut self) -> Result<PathBuf, TranslateError> {
        self.sync()?;
        let Self {
            target,
            partial,
            writer,
            ..
        } = self;
        drop(writer);

        fs::rename(&partial, &target).map_err(|e| {
            TranslateError::io(
                format!(
                    "Failed to move {} to {}",
                    partial.display(),
                    target.display()
                ),
                e,
            )
        })?;

        Ok(target)
    }

    fn write_error(&self, source: io::Error) -> TranslateError {
        TranslateError::io(
            format!("Failed to write output file {}", self.partial.display()),
            source,
        )
    }
}
