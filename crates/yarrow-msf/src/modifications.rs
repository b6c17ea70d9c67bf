use fnv::FnvHashMap;
use yarrow_core::modification::Modification;

use crate::peptides::PsmTable;
use crate::session::Session;
use crate::Error;

const RESIDUE_SQL: &str = r#"
    SELECT
        Peptides.PeptideID,
        PeptidesAminoAcidModifications.Position,
        AminoAcidModifications.Abbreviation
    FROM Peptides
    INNER JOIN PeptidesAminoAcidModifications ON Peptides.PeptideID = PeptidesAminoAcidModifications.PeptideID
    INNER JOIN AminoAcidModifications ON AminoAcidModifications.AminoAcidModificationID = PeptidesAminoAcidModifications.AminoAcidModificationID
"#;

const TERMINAL_SQL: &str = r#"
    SELECT
        Peptides.PeptideID,
        AminoAcidModifications.PositionType,
        AminoAcidModifications.Abbreviation
    FROM Peptides
    INNER JOIN PeptidesTerminalModifications ON Peptides.PeptideID = PeptidesTerminalModifications.PeptideID
    INNER JOIN AminoAcidModifications ON AminoAcidModifications.AminoAcidModificationID = PeptidesTerminalModifications.TerminalModificationID
"#;

/// Attach modifications to each row: terminal modifications first, then
/// residue modifications, each group in query order.
pub(crate) fn resolve_modifications(session: &Session, table: &mut PsmTable) -> Result<(), Error> {
    let mut residue: FnvHashMap<i64, Vec<Modification>> = FnvHashMap::default();
    let mut terminal: FnvHashMap<i64, Vec<Modification>> = FnvHashMap::default();

    let mut stmt = session.connection().prepare(RESIDUE_SQL)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let peptide_id: i64 = row.get(0)?;
        let position: i64 = row.get(1)?;
        let abbreviation: String = row.get(2)?;
        residue
            .entry(peptide_id)
            .or_default()
            .push(Modification::residue(&abbreviation, position));
    }

    let mut stmt = session.connection().prepare(TERMINAL_SQL)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let peptide_id: i64 = row.get(0)?;
        let position_type: i64 = row.get(1)?;
        let abbreviation: String = row.get(2)?;
        // Terminal positions anchor to the sequence, so the peptide must be
        // in the table
        let len = match table.get(peptide_id) {
            Some(psm) => psm.sequence.len(),
            None => continue,
        };
        // PositionType 1 marks the peptide N-terminus in the vendor schema
        let nterm = position_type == 1;
        terminal
            .entry(peptide_id)
            .or_default()
            .push(Modification::terminal(&abbreviation, nterm, len));
    }

    for psm in &mut table.rows {
        if let Some(mods) = terminal.get(&psm.peptide_id) {
            psm.modifications.extend(mods.iter().cloned());
        }
        if let Some(mods) = residue.get(&psm.peptide_id) {
            psm.modifications.extend(mods.iter().cloned());
        }
    }

    Ok(())
}
