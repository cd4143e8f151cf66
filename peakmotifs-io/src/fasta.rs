use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;

use peakmotifs_core::utils::get_dynamic_reader;

/// Line width used when writing FASTA sequence bodies.
pub const FASTA_LINE_WIDTH: usize = 50;

///
/// Read every sequence from a FASTA file, in file order, headers
/// discarded. Multi-line records are joined.
///
pub fn read_fasta_sequences(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;

    let mut sequences = Vec::new();
    let mut current: Option<String> = None;
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('>') || line.trim().is_empty() {
            if let Some(seq) = current.take() {
                sequences.push(seq);
            }
        } else {
            current.get_or_insert_with(String::new).push_str(line.trim());
        }
    }
    if let Some(seq) = current {
        sequences.push(seq);
    }

    Ok(sequences)
}

///
/// Write one FASTA record, wrapping the sequence at [FASTA_LINE_WIDTH]
/// columns.
///
pub fn write_fasta_record<W: Write>(writer: &mut W, name: &str, sequence: &str) -> Result<()> {
    writeln!(writer, ">{}", name)?;
    for chunk in sequence.as_bytes().chunks(FASTA_LINE_WIDTH) {
        writer.write_all(chunk)?;
        writeln!(writer)?;
    }
    Ok(())
}
