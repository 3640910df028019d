use indicatif::{ProgressBar, ProgressStyle};

use crate::output;

/// Progress bar over the characters of the source text.
///
/// Hidden in quiet mode. Clears itself when dropped (RAII pattern).
pub struct Progress {
    progress_bar: ProgressBar,
}

impl Progress {
    /// Creates a progress bar for a source of `total_chars` characters.
    #[allow(clippy::unwrap_used)]
    pub fn new(total_chars: usize, message: &str) -> Self {
        let progress_bar = if output::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total_chars as u64)
        };
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:30}] {pos}/{len} chars ({eta})")
                .unwrap()
                .progress_chars("=> "),
        );
        progress_bar.set_message(message.to_string());

        Self { progress_bar }
    }

    /// Records `chars` more characters as translated.
    pub fn advance(&self, chars: usize) {
        self.progress_bar.inc(chars as u64);
    }

    /// Prints a line above the bar without corrupting it.
    pub fn println(&self, message: &str) {
        if !output::is_quiet() {
            self.progress_bar.println(message);
        }
    }

    /// Stops the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
