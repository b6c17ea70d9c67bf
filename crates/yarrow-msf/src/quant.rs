use fnv::FnvHashMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::peptides::PsmTable;
use crate::session::Session;
use crate::Error;

const METHOD_SQL: &str = r#"
    SELECT ParameterValue
    FROM ProcessingNodeParameters
    WHERE ProcessingNodeParameters.ParameterName = 'QuantificationMethod'
"#;

const HEIGHT_SQL: &str = r#"
    SELECT
        Peptides.PeptideID,
        ReporterIonQuanResults.QuanChannelID,
        ReporterIonQuanResults.Height
    FROM Peptides
    INNER JOIN ReporterIonQuanResultsSearchSpectra ON Peptides.SpectrumID = ReporterIonQuanResultsSearchSpectra.SearchSpectrumID
    INNER JOIN ReporterIonQuanResults ON ReporterIonQuanResults.SpectrumID = ReporterIonQuanResultsSearchSpectra.SpectrumID
"#;

/// Reporter tables only exist in stores processed with a quantification node
const REPORTER_TABLES: &[&str] = &["ReporterIonQuanResults", "ReporterIonQuanResultsSearchSpectra"];

/// Channel names from the store's quantification method, in channel-id order
/// (index 0 is channel id 1). `None` when the store was searched without one.
pub(crate) fn quant_channels(session: &Session) -> Result<Option<Vec<String>>, Error> {
    let mut stmt = session.connection().prepare(METHOD_SQL)?;
    let mut rows = stmt.query([])?;
    let xml = match rows.next()? {
        Some(row) => row.get::<_, String>(0)?,
        None => return Ok(None),
    };
    tag_names(&xml).map(Some)
}

/// Extract the ordered channel names from a quantification method document.
///
/// Channels are `<Parameter name="TagName">` elements exactly two
/// `MethodPart` levels below the document root, in document order.
fn tag_names(xml: &str) -> Result<Vec<String>, Error> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut names = Vec::new();
    let mut pending = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if pending {
                    return Err(Error::QuantMethod("TagName parameter has no value".into()));
                }
                path.push(e.name().as_ref().to_vec());
                pending = is_tag_name(&path, &e);
            }
            Event::Empty(e) => {
                path.push(e.name().as_ref().to_vec());
                let matched = is_tag_name(&path, &e);
                path.pop();
                if matched {
                    return Err(Error::QuantMethod("TagName parameter has no value".into()));
                }
            }
            Event::Text(text) => {
                if pending {
                    names.push(text.unescape()?.into_owned());
                    pending = false;
                }
            }
            Event::CData(text) => {
                if pending {
                    names.push(String::from_utf8_lossy(&text).into_owned());
                    pending = false;
                }
            }
            Event::End(_) => {
                if pending {
                    return Err(Error::QuantMethod("TagName parameter has no value".into()));
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(names)
}

fn is_tag_name(path: &[Vec<u8>], e: &BytesStart<'_>) -> bool {
    if path.len() != 4
        || path[1] != b"MethodPart"
        || path[2] != b"MethodPart"
        || path[3] != b"Parameter"
    {
        return false;
    }
    e.attributes()
        .flatten()
        .any(|attr| attr.key.as_ref() == b"name" && attr.value.as_ref() == b"TagName")
}

/// Fill one reporter-ion height per configured channel into every row.
///
/// Heights join to peptides through the search-spectrum bridge table and are
/// keyed by (peptide, channel). Combinations without a measurement stay NaN,
/// as do NULL heights.
pub(crate) fn resolve_quant(
    session: &Session,
    table: &mut PsmTable,
    channels: &[String],
) -> Result<(), Error> {
    for name in REPORTER_TABLES {
        if !session.table_exists(name)? {
            return Err(Error::MissingTable(name.to_string()));
        }
    }

    let mut heights: FnvHashMap<(i64, i64), f64> = FnvHashMap::default();
    let mut stmt = session.connection().prepare(HEIGHT_SQL)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let peptide_id: i64 = row.get(0)?;
        let channel_id: i64 = row.get(1)?;
        let height: Option<f64> = row.get(2)?;
        if channel_id < 1 || channel_id > channels.len() as i64 {
            return Err(Error::QuantChannel {
                channel_id,
                channels: channels.len(),
            });
        }
        heights.insert((peptide_id, channel_id), height.unwrap_or(f64::NAN));
    }

    for psm in &mut table.rows {
        let quant = (1..=channels.len() as i64)
            .map(|channel_id| {
                heights
                    .get(&(psm.peptide_id, channel_id))
                    .copied()
                    .unwrap_or(f64::NAN)
            })
            .collect();
        psm.quant = Some(quant);
    }

    Ok(())
}
