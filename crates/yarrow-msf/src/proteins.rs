use fnv::FnvHashMap;
use yarrow_core::protein::{HeaderParser, Protein};

use crate::peptides::PsmTable;
use crate::session::Session;
use crate::Error;

const PROTEIN_SQL: &str = r#"
    SELECT
        Peptides.PeptideID,
        ProteinAnnotations.Description
    FROM Peptides
    INNER JOIN PeptidesProteins ON Peptides.PeptideID = PeptidesProteins.PeptideID
    INNER JOIN ProteinAnnotations ON ProteinAnnotations.ProteinID = PeptidesProteins.ProteinID
"#;

/// Attach resolved proteins to each row, in query order with duplicates
/// preserved, then derive the semicolon-joined summary columns.
///
/// Every annotation header in the join is parsed, whether or not its peptide
/// made it into the table: a malformed header means upstream corruption and
/// aborts the read.
pub(crate) fn resolve_proteins(session: &Session, table: &mut PsmTable) -> Result<(), Error> {
    let parser = HeaderParser::default();
    let mut resolved: FnvHashMap<i64, Vec<Protein>> = FnvHashMap::default();

    let mut stmt = session.connection().prepare(PROTEIN_SQL)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let peptide_id: i64 = row.get(0)?;
        let header: String = row.get(1)?;
        let protein = parser.parse(&header).map_err(|e| Error::ProteinHeader {
            peptide_id,
            header: e.0,
        })?;
        resolved.entry(peptide_id).or_default().push(protein);
    }

    for psm in &mut table.rows {
        if let Some(proteins) = resolved.get(&psm.peptide_id) {
            psm.proteins.extend(proteins.iter().cloned());
        }
        psm.protein_group_accessions = join(psm.proteins.iter().map(|p| p.accession.as_str()));
        psm.protein_descriptions = join(psm.proteins.iter().map(|p| p.description.as_str()));
    }

    Ok(())
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join("; ")
}
