//! Source text input.

mod reader;

pub use reader::InputReader;
