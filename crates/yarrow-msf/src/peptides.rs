use fnv::FnvHashMap;
use yarrow_core::{Confidence, PeptideMatch, PeptideSequence};

use crate::session::Session;
use crate::Error;

/// One row per peptide identification that resolves across all five tables;
/// anything lacking a score, spectrum header, file info or mass peak is
/// filtered by the inner joins.
const PEPTIDE_SQL: &str = r#"
    SELECT
        Peptides.PeptideID,
        Peptides.SpectrumID,
        Peptides.Sequence,
        Peptides.ConfidenceLevel,
        PeptideScores.ScoreValue,
        SpectrumHeaders.FirstScan,
        SpectrumHeaders.LastScan,
        FileInfos.FileName
    FROM Peptides
    INNER JOIN PeptideScores ON Peptides.PeptideID = PeptideScores.PeptideID
    INNER JOIN SpectrumHeaders ON Peptides.SpectrumID = SpectrumHeaders.SpectrumID
    INNER JOIN MassPeaks ON MassPeaks.MassPeakID = SpectrumHeaders.MassPeakID
    INNER JOIN FileInfos ON FileInfos.FileID = MassPeaks.FileID
"#;

/// Peptide rows in join order, plus a peptide-id index for the resolver
/// stages.
///
/// A peptide with several score rows appears once per score row; the index
/// points at its first copy. Resolver stages that annotate rows walk the row
/// vector, so every copy picks up the same annotations.
pub(crate) struct PsmTable {
    pub rows: Vec<PeptideMatch>,
    index: FnvHashMap<i64, usize>,
}

impl PsmTable {
    pub fn get(&self, peptide_id: i64) -> Option<&PeptideMatch> {
        let idx = *self.index.get(&peptide_id)?;
        self.rows.get(idx)
    }
}

/// Run the primary five-table join and materialize one `PeptideMatch` per
/// row. Confidence codes decode here (any code outside 1..=3 aborts the
/// read) and spectrum file paths reduce to their basename.
pub(crate) fn read_peptides(session: &Session) -> Result<PsmTable, Error> {
    let mut table = PsmTable {
        rows: Vec::new(),
        index: FnvHashMap::default(),
    };

    let mut stmt = session.connection().prepare(PEPTIDE_SQL)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let peptide_id: i64 = row.get(0)?;
        let raw_sequence: String = row.get(2)?;
        let code: i64 = row.get(3)?;
        let confidence = Confidence::try_from(code)
            .map_err(|_| Error::ConfidenceLevel { peptide_id, code })?;
        let file_name: String = row.get(7)?;

        let idx = table.rows.len();
        table.index.entry(peptide_id).or_insert(idx);
        table.rows.push(PeptideMatch {
            peptide_id,
            spectrum_id: row.get(1)?,
            sequence: PeptideSequence::extract(&raw_sequence),
            confidence,
            ion_score: row.get(4)?,
            first_scan: row.get(5)?,
            last_scan: row.get(6)?,
            spectrum_file: basename(&file_name).to_string(),
            proteins: Vec::new(),
            protein_group_accessions: String::new(),
            protein_descriptions: String::new(),
            modifications: Vec::new(),
            quant: None,
        });
    }

    Ok(table)
}

/// Strip the directory from a spectrum file path. Stores written on Windows
/// carry backslash separators regardless of the host platform.
fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
