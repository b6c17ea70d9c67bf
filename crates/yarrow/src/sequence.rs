use std::fmt::Display;

use serde::Serialize;

use crate::modification::Modification;

/// Canonical amino-acid sequence for one peptide identification.
///
/// Modifications are owned by the enclosing record, not the sequence;
/// operations that need them take the slice as an argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeptideSequence {
    pub residues: String,
}

impl PeptideSequence {
    /// Canonicalize a raw search-engine sequence token.
    ///
    /// Tokens may carry flanking-residue notation (`K.PEPTIDER.S`), in which
    /// case only the middle segment is the peptide. Total: every token yields
    /// a sequence.
    pub fn extract(raw: &str) -> PeptideSequence {
        let mut parts = raw.split('.');
        let token = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(middle), Some(_), None) => middle,
            _ => raw,
        };
        PeptideSequence {
            residues: token.to_ascii_uppercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Render the sequence with its modifications inline, N-terminal tags
    /// prefixed and C-terminal tags suffixed: `TMT6plex-AMS(Phospho)K`.
    pub fn annotated(&self, mods: &[Modification]) -> String {
        let mut out = String::with_capacity(self.residues.len() + 8 * mods.len());
        for m in mods.iter().filter(|m| m.nterm) {
            out.push_str(&m.abbreviation);
            out.push('-');
        }
        for (i, residue) in self.residues.chars().enumerate() {
            out.push(residue);
            for m in mods.iter().filter(|m| m.is_residue() && m.rel_pos == i as i64) {
                out.push('(');
                out.push_str(&m.abbreviation);
                out.push(')');
            }
        }
        for m in mods.iter().filter(|m| m.cterm) {
            out.push('-');
            out.push_str(&m.abbreviation);
        }
        out
    }
}

impl Display for PeptideSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.residues)
    }
}
