use serde::Serialize;

use crate::confidence::Confidence;
use crate::math;
use crate::modification::Modification;
use crate::protein::Protein;
use crate::sequence::PeptideSequence;

/// One peptide-spectrum match from a Discoverer search, fully resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeptideMatch {
    /// Unique peptide identifier from the store
    pub peptide_id: i64,
    pub spectrum_id: i64,
    /// Canonical amino-acid sequence
    pub sequence: PeptideSequence,
    pub confidence: Confidence,
    pub ion_score: f64,
    pub first_scan: i64,
    pub last_scan: i64,
    /// Source spectrum file, basename only
    pub spectrum_file: String,
    /// Resolved proteins in join order, duplicates preserved
    pub proteins: Vec<Protein>,
    /// Semicolon-joined accessions, same order as `proteins`
    pub protein_group_accessions: String,
    pub protein_descriptions: String,
    /// Terminal modifications first, then residue modifications, both in
    /// join order
    pub modifications: Vec<Modification>,
    /// One reporter-ion height per configured channel, NaN when not
    /// measured. None when the store carries no quantification method.
    pub quant: Option<Vec<f64>>,
}

/// The assembled peptide table for one store. Rows are positional, in join
/// order; peptide ids survive only as a column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    pub psms: Vec<PeptideMatch>,
    /// Channel names from the quantification method, in channel-id order.
    /// Present if and only if the store was quantified.
    pub channels: Option<Vec<String>>,
}

/// Per-row statistics between two groups of quantification channels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GroupComparison {
    pub fold_change: f64,
    pub snr: f64,
    pub p_value: f64,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.psms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psms.is_empty()
    }

    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.channels
            .as_ref()
            .and_then(|channels| channels.iter().position(|c| c == name))
    }

    /// Compare two channel groups row by row. Group members are channel
    /// indices; NaN heights are dropped before the statistics run, so a row
    /// measured in neither group yields all-NaN results. Empty when the
    /// dataset carries no quantification.
    pub fn compare_groups(&self, numerator: &[usize], denominator: &[usize]) -> Vec<GroupComparison> {
        if self.channels.is_none() {
            return Vec::new();
        }
        self.psms
            .iter()
            .map(|psm| {
                let quant = psm.quant.as_deref().unwrap_or(&[]);
                let a = finite_subset(quant, numerator);
                let b = finite_subset(quant, denominator);
                GroupComparison {
                    fold_change: math::fold_change(&a, &b),
                    snr: math::snr(&a, &b),
                    p_value: math::p_value(&a, &b),
                }
            })
            .collect()
    }

    /// Cumulative base-2 fold change of each row's measured channels,
    /// normalized to the first measured channel. One entry per row; NaN for
    /// unquantified rows.
    pub fn channel_variability(&self) -> Vec<f64> {
        self.psms
            .iter()
            .map(|psm| match &psm.quant {
                Some(quant) => {
                    let measured: Vec<f64> =
                        quant.iter().copied().filter(|v| v.is_finite()).collect();
                    math::log_cum_fold_change(&measured)
                }
                None => f64::NAN,
            })
            .collect()
    }
}

fn finite_subset(values: &[f64], indices: &[usize]) -> Vec<f64> {
    indices
        .iter()
        .filter_map(|&i| values.get(i))
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}
