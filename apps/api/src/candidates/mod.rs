// Candidate side: resume upload, text extraction, profile assembly and archival.
// All language-model calls go through parser::StructuredParser.

pub mod archive;
pub mod extract;
pub mod handlers;
pub mod ingest;
