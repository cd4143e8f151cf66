use std::fs::File;
use std::io::BufWriter;
use std::ops::Range;
use std::path::Path;

use anyhow::Result;
use log::warn;

use peakmotifs_core::{MethylIndex, PeakSet};
use peakmotifs_io::{GenomeAccessor, write_fasta_record};

///
/// Produce a FASTA for a rank range of peaks (or the whole file), named
/// by peak.
///
/// Each record's bases come from the genome accessor; a failed read skips
/// that one peak and continues. With a methylation index, methylated CG
/// pairs are rewritten to their M/W codes.
///
/// Returns the number of records written.
///
pub fn peaks_to_fasta<G: GenomeAccessor>(
    peaks: &Path,
    genome: &mut G,
    output: &Path,
    methyl: Option<&MethylIndex>,
    rank_range: Option<Range<usize>>,
) -> Result<usize> {
    let set = PeakSet::try_from(peaks)?;
    let selected = match rank_range {
        Some(range) => set.rank_range(range),
        None => &set.peaks,
    };

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(output)?);

    let mut written = 0usize;
    for peak in selected {
        let mut segment = match genome.load_fragment(&peak.chrom, peak.start, peak.end - peak.start)
        {
            Ok(segment) => segment,
            Err(e) => {
                warn!(
                    "error reading sequence at {}:{}-{}: {}",
                    peak.chrom, peak.start, peak.end, e
                );
                continue;
            }
        };
        if let Some(methyl) = methyl {
            segment = methyl.substitute_methylated_bases(&segment, &peak.chrom, peak.start);
        }

        write_fasta_record(&mut writer, &peak.name, &segment)?;
        written += 1;
    }

    Ok(written)
}
