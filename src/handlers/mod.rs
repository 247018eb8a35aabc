pub mod ingest;
pub mod response;

pub use ingest::{ingest, IngestError};
pub use response::{analyze_outcome, upload_outcome, Envelope};
