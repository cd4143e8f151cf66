use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use peakmotifs_core::PeakSet;
use peakmotifs_io::{FimoHit, parse_meme_xml, parse_num_sequences, read_fimo_tsv};
use peakmotifs_stats::{
    MotifData, OccurrenceTable, assemble_report, count_occurrences, peak_centrality,
    summit_offsets,
};

use crate::consts::{FIMO_TSV_FILENAME, FIMO_XML_FILENAME};

/// Occurrence tables, raw hits, and the scanned-sequence count for one
/// FIMO output directory.
type ScanData = (HashMap<String, OccurrenceTable>, Vec<FimoHit>, u32);

///
/// Assemble the final `motifs.json` from a MEME run and the four FIMO
/// result directories (original peaks, lesser-ranked centers, shuffled
/// background, flanks), joined with the cleaned peaks for centrality.
///
pub fn motif_json(
    meme_xml: &Path,
    original_fimo_dir: &Path,
    lesser_fimo_dir: &Path,
    shuffled_fimo_dir: &Path,
    flank_fimo_dir: &Path,
    peaks_bed: &Path,
    out_json: &Path,
) -> Result<MotifData> {
    let meme = parse_meme_xml(meme_xml)?;
    let motif_names: Vec<String> = meme.motifs.iter().map(|m| m.name.clone()).collect();

    let scan = |dir: &Path| -> Result<ScanData> {
        let total = parse_num_sequences(&dir.join(FIMO_XML_FILENAME))?;
        let hits = read_fimo_tsv(&dir.join(FIMO_TSV_FILENAME))?;
        let tables = count_occurrences(&hits, &motif_names, total);
        Ok((tables, hits, total))
    };

    let (original, original_hits, original_total) =
        scan(original_fimo_dir).context("reading original-peaks scan")?;
    let (lesser, _, _) = scan(lesser_fimo_dir).context("reading lesser-peaks scan")?;
    let (shuffled, _, _) = scan(shuffled_fimo_dir).context("reading shuffled scan")?;
    let (flank, _, _) = scan(flank_fimo_dir).context("reading flank scan")?;

    let peaks = PeakSet::try_from(peaks_bed)?;
    let centrality = peak_centrality(&original_hits, &summit_offsets(&peaks));

    let report = assemble_report(
        &meme,
        original_total,
        &original,
        &lesser,
        &flank,
        &shuffled,
        &centrality,
    );

    if let Some(parent) = out_json.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(out_json)?);
    serde_json::to_writer_pretty(writer, &report)?;
    info!("wrote report for {} motifs to {:?}", report.motifs.len(), out_json);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    const MEME_XML: &str = r#"<?xml version="1.0"?>
<MEME version="5.1.0">
  <training_set primary_sequences="top500.center.seqs" primary_count="500">
    <letter_frequencies>
      <alphabet_array>
        <value letter_id="A">0.3</value>
        <value letter_id="C">0.2</value>
        <value letter_id="G">0.2</value>
        <value letter_id="T">0.3</value>
      </alphabet_array>
    </letter_frequencies>
  </training_set>
  <motifs>
    <motif id="motif_1" name="CCGGAA" width="6" sites="120" e_value="1e-40">
      <probabilities>
        <alphabet_matrix>
          <alphabet_array>
            <value letter_id="A">0.1</value>
            <value letter_id="C">0.7</value>
            <value letter_id="G">0.1</value>
            <value letter_id="T">0.1</value>
          </alphabet_array>
        </alphabet_matrix>
      </probabilities>
    </motif>
  </motifs>
</MEME>"#;

    fn write_fimo_dir(root: &Path, name: &str, num_sequences: u32, rows: &[&str]) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(FIMO_XML_FILENAME),
            format!(
                "<fimo version=\"5.1.0\"><sequence-data num-sequences=\"{}\"/></fimo>",
                num_sequences
            ),
        )
        .unwrap();
        let mut tsv = String::from(
            "motif_id\tmotif_alt_id\tsequence_name\tstart\tstop\tstrand\tscore\tp-value\tq-value\tmatched_sequence\n",
        );
        for row in rows {
            tsv.push_str(row);
            tsv.push('\n');
        }
        std::fs::write(dir.join(FIMO_TSV_FILENAME), tsv).unwrap();
        dir
    }

    #[test]
    fn test_motif_json_end_to_end() {
        let tempdir = tempfile::tempdir().unwrap();
        let root = tempdir.path();

        let meme_xml = root.join("meme.xml");
        std::fs::write(&meme_xml, MEME_XML).unwrap();

        let peaks = root.join("cleaned.bed");
        std::fs::write(
            &peaks,
            "chr1\t1000\t1300\tpeak_0\t0\t.\t1.0\t2.0\t3.0\t150\n\
             chr1\t5000\t5300\tpeak_1\t0\t.\t1.0\t2.0\t3.0\t150\n",
        )
        .unwrap();

        let original = write_fimo_dir(
            root,
            "orig.fimo",
            1000,
            &[
                "CCGGAA\tMEME-1\tpeak_0\t148\t153\t+\t10\t1e-5\t0.01\tCCGGAA",
                "CCGGAA\tMEME-1\tpeak_1\t100\t105\t-\t10\t1e-5\t0.01\tTTCCGG",
            ],
        );
        let lesser = write_fimo_dir(
            root,
            "center.fimo",
            500,
            &["CCGGAA\tMEME-1\tpeak_0\t10\t15\t+\t10\t1e-5\t0.01\tCCGGAA"],
        );
        let shuffled = write_fimo_dir(root, "shuffled.fimo", 50000, &[]);
        let flank = write_fimo_dir(
            root,
            "flank.fimo",
            500,
            &["CCGGAA\tMEME-1\tpeak_0\t10\t15\t+\t10\t1e-5\t0.01\tCCGGAA"],
        );

        let out = root.join("motifs.json");
        let report = motif_json(&meme_xml, &original, &lesser, &shuffled, &flank, &peaks, &out)
            .unwrap();

        assert_eq!(report.motifs.len(), 1);
        let motif = &report.motifs[0];
        assert_eq!(motif.original_peaks, 1000);
        assert_eq!(motif.original_peaks_occurrences, 2);
        assert_eq!(motif.lesser_peaks_occurrences_ratio, 1.0 / 500.0);
        // same ratio as the flank control: no enrichment either way
        assert_eq!(motif.flank_control_data.z_score, 0.0);
        // lesser ratio beats the empty shuffled set
        assert!(motif.shuffled_control_data.z_score > 0.0);

        // centrality: midpoint of 148..153 is 150.5, floored to 150 on +,
        // summit offset 150 -> distance 0; the reverse hit at 100..105
        // rounds up to 103, distance 150-103=47, negated
        assert_eq!(motif.peak_centrality[&0], 0.5);
        assert_eq!(motif.peak_centrality[&-47], 0.5);

        // the file on disk parses back to the same structure
        let text = std::fs::read_to_string(&out).unwrap();
        let parsed: MotifData = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.motifs[0].name, "CCGGAA");
        assert_eq!(parsed.background_frequencies[&'A'], 0.3);
    }
}
