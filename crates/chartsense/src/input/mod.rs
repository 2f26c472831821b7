//! Row records and file ingestion.

mod parser;
mod source;
mod value;

pub use parser::{Parser, ParserConfig};
pub use source::{Dataset, SourceMetadata};
pub use value::{row, Row, Value};
