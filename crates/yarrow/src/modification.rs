use serde::Serialize;

use crate::sequence::PeptideSequence;

/// A chemical modification anchored to one peptide identification, either at
/// a residue position or at one of the termini (`nterm`/`cterm` are mutually
/// exclusive and both false for residue modifications).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Modification {
    /// Zero-based position within the peptide sequence.
    pub rel_pos: i64,
    /// Short modification name as stored by the search engine ("Phospho").
    pub abbreviation: String,
    pub nterm: bool,
    pub cterm: bool,
}

impl Modification {
    pub fn residue(abbreviation: &str, rel_pos: i64) -> Modification {
        Modification {
            rel_pos,
            abbreviation: abbreviation.into(),
            nterm: false,
            cterm: false,
        }
    }

    /// Terminal modifications anchor to the first or last residue of the
    /// peptide they annotate.
    pub fn terminal(abbreviation: &str, nterm: bool, peptide_len: usize) -> Modification {
        Modification {
            rel_pos: if nterm {
                0
            } else {
                peptide_len.saturating_sub(1) as i64
            },
            abbreviation: abbreviation.into(),
            nterm,
            cterm: !nterm,
        }
    }

    pub fn is_residue(&self) -> bool {
        !self.nterm && !self.cterm
    }

    pub fn is_terminal(&self) -> bool {
        self.nterm || self.cterm
    }

    /// Human-readable form: `N-term(TMT6plex)`, `C-term(Amidated)` or
    /// `S3(Phospho)` (residue letter plus one-based position).
    pub fn describe(&self, seq: &PeptideSequence) -> String {
        if self.nterm {
            return format!("N-term({})", self.abbreviation);
        }
        if self.cterm {
            return format!("C-term({})", self.abbreviation);
        }
        let letter = usize::try_from(self.rel_pos)
            .ok()
            .and_then(|pos| seq.residues.chars().nth(pos))
            .unwrap_or('?');
        format!("{}{}({})", letter, self.rel_pos + 1, self.abbreviation)
    }
}
