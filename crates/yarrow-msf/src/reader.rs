use std::path::Path;

use log::info;
use yarrow_core::Dataset;

use crate::session::Session;
use crate::{modifications, peptides, proteins, quant, Error};

/// Read one `.msf` store into a fully resolved peptide table.
///
/// The stages run in a fixed order over one scoped connection: peptides,
/// proteins, modifications, then reporter-ion quantification when the store
/// was processed with a quantification method. The read either returns the
/// complete table or fails on the first error; no partial table escapes.
pub fn read_msf<P: AsRef<Path>>(path: P) -> Result<Dataset, Error> {
    let path = path.as_ref();
    info!(
        "loading peptides from {:?}",
        path.file_name().unwrap_or(path.as_os_str())
    );

    let session = Session::open(path)?;

    // A configured method with zero channels disables quantification, same
    // as no method at all
    let channels = quant::quant_channels(&session)?.filter(|c| !c.is_empty());

    let mut table = peptides::read_peptides(&session)?;
    proteins::resolve_proteins(&session, &mut table)?;
    modifications::resolve_modifications(&session, &mut table)?;

    if let Some(channels) = &channels {
        quant::resolve_quant(&session, &mut table, channels)?;
    }

    Ok(Dataset {
        psms: table.rows,
        channels,
    })
}
