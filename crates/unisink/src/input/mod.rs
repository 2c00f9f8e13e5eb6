//! Reading raw input files.

mod reader;
mod source;

pub use reader::{load_lines, load_rows, read_lines, read_rows, Row};
pub use source::SourceMetadata;
