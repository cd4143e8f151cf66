use std::path::Path;

use anyhow::{Context, Result, bail};
use log::warn;
use quick_xml::Reader;
use quick_xml::events::Event;

///
/// One motif occurrence from a `fimo.tsv`: coordinates are 1-based and
/// relative to the scanned sequence, as FIMO reports them.
///
#[derive(Clone, Debug, PartialEq)]
pub struct FimoHit {
    pub motif_id: String,
    pub sequence_id: String,
    pub start: u64,
    pub stop: u64,
    pub strand: char,
    pub q_value: f64,
}

///
/// Read hits from a `fimo.tsv`. Header, comment, and blank lines are
/// skipped; a malformed record is logged and skipped.
///
pub fn read_fimo_tsv(path: &Path) -> Result<Vec<FimoHit>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open fimo tsv: {:?}", path))?;

    let mut hits = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 9 || record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let parsed = (|| {
            Some(FimoHit {
                motif_id: record.get(0)?.to_string(),
                sequence_id: record.get(2)?.to_string(),
                start: record.get(3)?.parse().ok()?,
                stop: record.get(4)?.parse().ok()?,
                strand: record.get(5)?.chars().next()?,
                q_value: record.get(8)?.parse().ok()?,
            })
        })();

        match parsed {
            Some(hit) => hits.push(hit),
            None => warn!(
                "skipping malformed fimo record {} in {:?}",
                index + 2,
                path
            ),
        }
    }

    Ok(hits)
}

///
/// Number of sequences FIMO scanned, from the `<sequence-data>` element
/// of its `fimo.xml`.
///
pub fn parse_num_sequences(path: &Path) -> Result<u32> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fimo xml: {:?}", path))?;
    parse_num_sequences_str(&xml).with_context(|| format!("Failed to parse fimo xml: {:?}", path))
}

pub fn parse_num_sequences_str(xml: &str) -> Result<u32> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => bail!("XML parsing error: {}", e),
        };
        let element = match &event {
            Event::Start(e) | Event::Empty(e) => e,
            Event::Eof => break,
            _ => continue,
        };
        if element.name().as_ref() != b"sequence-data" {
            continue;
        }
        for attr in element.attributes().flatten() {
            if attr.key.as_ref() == b"num-sequences" {
                return Ok(String::from_utf8_lossy(&attr.value).parse()?);
            }
        }
    }

    bail!("no sequence-data element found")
}
