use std::fs;
use std::io;
use std::path::Path;

use crate::error::TranslateError;

const MAX_INPUT_SIZE: usize = 16 * 1024 * 1024; // 16MB

pub struct InputReader;

impl InputReader {
    /// Reads the whole source file into memory.
    ///
    /// A missing path is an argument error; oversized or non-UTF-8 files are
    /// I/O errors.
    pub fn read(path: &Path) -> Result<String, TranslateError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TranslateError::Argument(format!(
                    "file '{}' does not exist",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(TranslateError::io(
                    format!("Failed to access file: {}", path.display()),
                    e,
                ));
            }
        };

        if !metadata.is_file() {
            return Err(TranslateError::Argument(format!(
                "'{}' is not a regular file",
                path.display()
            )));
        }

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            return Err(TranslateError::io(
                format!("Failed to read file: {}", path.display()),
                io::Error::new(
                    io::ErrorKind::FileTooLarge,
                    format!(
                        "input size ({:.1} MB) exceeds maximum allowed size (16 MB)",
                        size as f64 / 1024.0 / 1024.0
                    ),
                ),
            ));
        }

        fs::read_to_string(path)
            .map_err(|e| TranslateError::io(format!("Failed to read file: {}", path.display()), e))
    }
}
