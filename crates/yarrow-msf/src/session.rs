use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::Error;

/// Tables every readable store must carry. The reporter-ion pair is checked
/// separately, once a quantification method activates that stage.
const REQUIRED_TABLES: &[&str] = &[
    "Peptides",
    "PeptideScores",
    "SpectrumHeaders",
    "FileInfos",
    "MassPeaks",
    "PeptidesProteins",
    "ProteinAnnotations",
    "PeptidesAminoAcidModifications",
    "PeptidesTerminalModifications",
    "AminoAcidModifications",
    "ProcessingNodeParameters",
];

/// An open connection to one `.msf` store.
///
/// The store is opened read-only and never written. The connection is
/// released when the session drops, on every exit path.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Open a store and validate its schema.
    ///
    /// A missing path is rejected up front; SQLite would otherwise create an
    /// empty database in read-write mode and fail much later.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Session, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::StoreNotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let session = Session { conn };
        session.check_schema()?;
        Ok(session)
    }

    fn check_schema(&self) -> Result<(), Error> {
        for table in REQUIRED_TABLES {
            if !self.table_exists(table)? {
                return Err(Error::MissingTable(table.to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn table_exists(&self, name: &str) -> Result<bool, Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Raw statement surface for the pipeline stages.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
