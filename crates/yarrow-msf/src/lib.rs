//! Reading Proteome Discoverer `.msf` result stores.
//!
//! An `.msf` file is an embedded SQLite database. [`read_msf`] runs the full
//! ingestion pipeline over one store and returns the assembled peptide table;
//! [`Session`] is the scoped connection it runs over.

use std::path::PathBuf;

mod modifications;
mod peptides;
mod proteins;
mod quant;
pub mod reader;
pub mod session;

pub use reader::read_msf;
pub use session::Session;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("msf store not found: {}", .0.display())]
    StoreNotFound(PathBuf),
    #[error("not a valid msf store: missing table {0}")]
    MissingTable(String),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed protein header for peptide {peptide_id}: {header:?}")]
    ProteinHeader { peptide_id: i64, header: String },
    #[error("unknown confidence code {code} for peptide {peptide_id}")]
    ConfidenceLevel { peptide_id: i64, code: i64 },
    #[error("malformed quantification method xml: {0}")]
    QuantMethodXml(#[from] quick_xml::Error),
    #[error("malformed quantification method: {0}")]
    QuantMethod(String),
    #[error("quantification channel {channel_id} outside the {channels} configured channels")]
    QuantChannel { channel_id: i64, channels: usize },
}
