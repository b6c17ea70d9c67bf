use rayon::prelude::*;
use yarrow_core::{Dataset, GroupComparison, PeptideMatch};

use crate::Runner;

impl Runner {
    pub fn serialize_psm(
        &self,
        psm: &PeptideMatch,
        comparison: Option<&GroupComparison>,
    ) -> csv::ByteRecord {
        let mut record = csv::ByteRecord::new();
        record.push_field(itoa::Buffer::new().format(psm.peptide_id).as_bytes());
        record.push_field(psm.sequence.residues.as_bytes());
        record.push_field(psm.sequence.annotated(&psm.modifications).as_bytes());
        let modifications = psm
            .modifications
            .iter()
            .map(|m| m.describe(&psm.sequence))
            .collect::<Vec<_>>()
            .join("; ");
        record.push_field(modifications.as_bytes());
        record.push_field(psm.protein_group_accessions.as_bytes());
        record.push_field(psm.protein_descriptions.as_bytes());
        record.push_field(psm.confidence.to_string().as_bytes());
        record.push_field(ryu::Buffer::new().format(psm.ion_score).as_bytes());
        record.push_field(psm.spectrum_file.as_bytes());
        record.push_field(itoa::Buffer::new().format(psm.first_scan).as_bytes());
        record.push_field(itoa::Buffer::new().format(psm.last_scan).as_bytes());
        if let Some(quant) = &psm.quant {
            for value in quant {
                push_float(&mut record, *value);
            }
        }
        if let Some(comparison) = comparison {
            push_float(&mut record, comparison.fold_change);
            push_float(&mut record, comparison.snr);
            push_float(&mut record, comparison.p_value);
        }
        record
    }

    pub fn write_psms(
        &self,
        label: &str,
        data: &Dataset,
        comparisons: Option<&[GroupComparison]>,
    ) -> anyhow::Result<String> {
        let path = self.make_path(format!("{label}.psms.tsv"));

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(vec![]);

        let mut headers = csv::ByteRecord::from(vec![
            "peptide_id",
            "sequence",
            "modified_sequence",
            "modifications",
            "proteins",
            "protein_descriptions",
            "confidence",
            "ion_score",
            "spectrum_file",
            "first_scan",
            "last_scan",
        ]);
        if let Some(channels) = &data.channels {
            headers.extend(channels);
        }
        if comparisons.is_some() {
            headers.extend(["fold_change", "snr", "p_value"]);
        }

        wtr.write_byte_record(&headers)?;
        for record in data
            .psms
            .par_iter()
            .enumerate()
            .map(|(i, psm)| self.serialize_psm(psm, comparisons.map(|c| &c[i])))
            .collect::<Vec<_>>()
        {
            wtr.write_byte_record(&record)?;
        }

        wtr.flush()?;
        let bytes = wtr.into_inner()?;
        std::fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }
}

/// Missing measurements write as empty fields, not a NaN literal
fn push_float(record: &mut csv::ByteRecord, value: f64) {
    if value.is_nan() {
        record.push_field(b"");
    } else {
        record.push_field(ryu::Buffer::new().format(value).as_bytes());
    }
}
