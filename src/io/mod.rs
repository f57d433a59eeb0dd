mod document;

pub use document::{PartitionDocument, write_json};
