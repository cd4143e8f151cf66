use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use log::warn;

use peakmotifs_core::PeakSet;
use peakmotifs_io::read_fimo_tsv;

///
/// Translate a FIMO result table into an occurrences TSV with absolute
/// genomic coordinates, by joining each hit's sequence-relative range
/// onto its peak's start.
///
/// FIMO reports 1-based inclusive ranges; the output keeps the BED
/// convention (0-based, end-exclusive), hence the -1 on the start only.
///
pub fn occurrences_tsv(fimo_tsv: &Path, peaks_bed: &Path, out: &Path) -> Result<usize> {
    let peaks = PeakSet::try_from(peaks_bed)?;
    let starts: HashMap<&str, (&str, u64)> = peaks
        .iter()
        .map(|p| (p.name.as_str(), (p.chrom.as_str(), p.start)))
        .collect();

    let hits = read_fimo_tsv(fimo_tsv)?;

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(out)?);
    writeln!(writer, "#motif_id\tchromosome\tstart\tend\tstrand\tq_value")?;

    let mut written = 0usize;
    for hit in hits {
        let Some(&(chrom, peak_start)) = starts.get(hit.sequence_id.as_str()) else {
            warn!(
                "fimo hit names unknown peak {}, skipping",
                hit.sequence_id
            );
            continue;
        };
        let absolute_start = peak_start + hit.start - 1;
        let absolute_end = peak_start + hit.stop;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            hit.motif_id, chrom, absolute_start, absolute_end, hit.strand, hit.q_value
        )?;
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_absolute_positioning() {
        let tempdir = tempfile::tempdir().unwrap();

        let peaks = tempdir.path().join("peaks.bed");
        std::fs::write(
            &peaks,
            "chr19\t66000\t66300\tpeak_0\t0\t.\t1.0\t2.0\t3.0\t150\n\
             chr3\t1000\t1300\tpeak_1\t0\t.\t1.0\t2.0\t3.0\t150\n",
        )
        .unwrap();

        let fimo = tempdir.path().join("fimo.tsv");
        std::fs::write(
            &fimo,
            "motif_id\tmotif_alt_id\tsequence_name\tstart\tstop\tstrand\tscore\tp-value\tq-value\tmatched_sequence\n\
             CCGGAA\tMEME-1\tpeak_0\t34\t39\t+\t11.4\t1.2e-05\t0.019\tCCGGAA\n\
             CCGGAA\tMEME-1\tpeak_9\t34\t39\t+\t11.4\t1.2e-05\t0.019\tCCGGAA\n\
             CCGGAA\tMEME-1\tpeak_1\t1\t6\t-\t10.0\t2e-05\t0.02\tTTCCGG\n",
        )
        .unwrap();

        let out = tempdir.path().join("occurrences.tsv");
        let written = occurrences_tsv(&fimo, &peaks, &out).unwrap();
        assert_eq!(written, 2);

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#motif_id\tchromosome\tstart\tend\tstrand\tq_value");
        assert_eq!(lines[1], "CCGGAA\tchr19\t66033\t66039\t+\t0.019");
        assert_eq!(lines[2], "CCGGAA\tchr3\t1000\t1006\t-\t0.02");
    }
}
