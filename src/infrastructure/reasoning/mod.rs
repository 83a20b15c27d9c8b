pub mod disabled;
pub mod file;
pub mod gemini;
pub mod parse;
pub mod prompt;
