use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

/// Search-engine assigned quality tier for a peptide identification.
///
/// Discoverer stores these as the integer codes 1 (Low), 2 (Medium) and
/// 3 (High). Any other code is rejected rather than defaulted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidConfidence {
    Code(i64),
    Name(String),
}

impl Display for InvalidConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfidence::Code(code) => write!(f, "unknown confidence code {}", code),
            InvalidConfidence::Name(name) => write!(f, "unknown confidence level {:?}", name),
        }
    }
}

impl std::error::Error for InvalidConfidence {}

impl TryFrom<i64> for Confidence {
    type Error = InvalidConfidence;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Confidence::Low),
            2 => Ok(Confidence::Medium),
            3 => Ok(Confidence::High),
            other => Err(InvalidConfidence::Code(other)),
        }
    }
}

impl FromStr for Confidence {
    type Err = InvalidConfidence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Confidence::Low),
            "medium" => Ok(Confidence::Medium),
            "high" => Ok(Confidence::High),
            _ => Err(InvalidConfidence::Name(s.into())),
        }
    }
}

impl Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => f.write_str("Low"),
            Confidence::Medium => f.write_str("Medium"),
            Confidence::High => f.write_str("High"),
        }
    }
}
