use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use peakmotifs_core::{MethylIndex, parse_chrom_sizes};
use peakmotifs_io::IndexedFastaGenome;
use peakmotifs_pipeline::random_sequences;

pub fn run_sample(matches: &ArgMatches) -> Result<()> {
    let genome_path = matches
        .get_one::<String>("genome")
        .expect("A path to a genome FASTA is required.");
    let chrom_info = matches
        .get_one::<String>("chrom-info")
        .expect("A path to a chrom sizes file is required.");
    let input_fasta = matches
        .get_one::<String>("input-fasta")
        .expect("A path to a treatment FASTA is required.");
    let output = matches
        .get_one::<String>("output")
        .expect("An output path is required.");

    let outputs_per_input: usize = matches
        .get_one::<String>("outputs-per-input")
        .expect("argument has a default")
        .parse()
        .context("invalid value for --outputs-per-input")?;
    let gc_tolerance: u32 = matches
        .get_one::<String>("gc-tolerance")
        .expect("argument has a default")
        .parse()
        .context("invalid value for --gc-tolerance")?;
    let threshold: f64 = matches
        .get_one::<String>("methyl-percent-threshold")
        .expect("argument has a default")
        .parse()
        .context("invalid value for --methyl-percent-threshold")?;
    let seed = matches
        .get_one::<String>("seed")
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("invalid value for --seed")?;

    let methyl_beds: Vec<PathBuf> = matches
        .get_many::<String>("methyl-beds")
        .unwrap_or_default()
        .map(PathBuf::from)
        .collect();
    let methyl = if methyl_beds.is_empty() {
        None
    } else {
        Some(MethylIndex::from_files(&methyl_beds, threshold)?)
    };

    let chrom_sizes = parse_chrom_sizes(Path::new(chrom_info))?;
    let mut genome = IndexedFastaGenome::open(Path::new(genome_path))?;

    let written = random_sequences(
        &mut genome,
        Path::new(input_fasta),
        Path::new(output),
        outputs_per_input,
        &chrom_sizes,
        gc_tolerance,
        methyl.as_ref(),
        seed,
    )?;
    info!("wrote {} background sequences to {}", written, output);

    Ok(())
}
