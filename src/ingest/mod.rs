pub mod dataset;
pub mod parser;
pub mod source;

pub use dataset::{digest_text, Dataset, IngestError, RowSearch};
pub use parser::{parse, ParsedText, RecordParser};
pub use source::{read_source, SourceLoader};
