use std::fmt::Display;

use regex::Regex;
use serde::Serialize;

/// One protein hit attached to a peptide identification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Protein {
    pub accession: String,
    pub description: String,
}

/// Decodes UniProt-style annotation headers of the shape
/// `>sp|ACCESSION|NAME description`.
#[derive(Clone)]
pub struct HeaderParser {
    header: Regex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidHeader(pub String);

impl Display for InvalidHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed protein header {:?}", self.0)
    }
}

impl std::error::Error for InvalidHeader {}

impl Default for HeaderParser {
    fn default() -> Self {
        Self {
            header: Regex::new(r"^>sp\|([0-9A-Za-z]+)\|[0-9A-Za-z_]+ (.*)$").unwrap(),
        }
    }
}

impl HeaderParser {
    /// Extract the accession and free-text description from a raw header.
    ///
    /// The pattern is anchored at both ends: a header that does not fit the
    /// grammar is an error, never a partial record.
    pub fn parse(&self, raw: &str) -> Result<Protein, InvalidHeader> {
        let caps = self
            .header
            .captures(raw)
            .ok_or_else(|| InvalidHeader(raw.into()))?;
        Ok(Protein {
            accession: caps[1].to_string(),
            description: caps[2].to_string(),
        })
    }
}
