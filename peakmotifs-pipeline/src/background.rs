use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Result;
use log::info;

use peakmotifs_core::{ChromSizes, MethylIndex};
use peakmotifs_io::{GenomeAccessor, read_fasta_sequences, write_fasta_record};
use peakmotifs_sampling::BackgroundSampler;

use crate::consts::RANDOM_PREFIX;

///
/// Sample GC-matched background sequences for every record of
/// `input_fasta` and write them as sequentially numbered FASTA records.
///
/// Returns the number of sequences written; a shortfall against
/// `outputs_per_input` has already been logged by the sampler.
///
#[allow(clippy::too_many_arguments)]
pub fn random_sequences<G: GenomeAccessor>(
    genome: &mut G,
    input_fasta: &Path,
    output_fasta: &Path,
    outputs_per_input: usize,
    chrom_sizes: &ChromSizes,
    gc_tolerance: u32,
    methyl: Option<&MethylIndex>,
    seed: Option<u64>,
) -> Result<usize> {
    let treatment = read_fasta_sequences(input_fasta)?;
    info!(
        "sampling {} background sequences for {} inputs",
        outputs_per_input * treatment.len(),
        treatment.len()
    );

    let mut sampler = BackgroundSampler::new(
        chrom_sizes,
        outputs_per_input,
        gc_tolerance,
        methyl,
        seed,
    );
    let candidates = sampler.sample(genome, &treatment)?;

    if let Some(parent) = output_fasta.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(output_fasta)?);
    for (index, candidate) in candidates.iter().enumerate() {
        write_fasta_record(
            &mut writer,
            &format!("{}_{}", RANDOM_PREFIX, index),
            &candidate.bases,
        )?;
    }

    Ok(candidates.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use peakmotifs_io::InMemoryGenome;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_writes_numbered_records() {
        let tempdir = tempfile::tempdir().unwrap();
        let input = tempdir.path().join("treatment.fa");
        std::fs::write(&input, ">t0\nACGTACGTAC\n").unwrap();
        let output = tempdir.path().join("shuffled.fa");

        let mut genome = InMemoryGenome::new(HashMap::from([(
            "chr1".to_string(),
            "ACGT".repeat(100),
        )]));
        let sizes = genome.chrom_sizes();

        let written =
            random_sequences(&mut genome, &input, &output, 3, &sizes, 50, None, Some(5)).unwrap();
        assert_eq!(written, 3);

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains(">Random_0\n"));
        assert!(text.contains(">Random_2\n"));
        assert_eq!(read_fasta_sequences(&output).unwrap().len(), 3);
    }
}
