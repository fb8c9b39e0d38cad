// Parsers for style and layout strings given on the command line or in config files

pub mod color;
pub mod lexer;
pub mod size;

// Public API re-exports
pub use color::parse_color;
pub use size::parse_size;
