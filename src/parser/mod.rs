//! Parsers for SVG input: path data, transform attributes, and documents

pub mod lexer;
mod path;
mod svg;
mod transform;

pub use path::{tokenize, PathCommand};
pub use svg::{extract_path, SvgPath};
pub use transform::parse_transform;
