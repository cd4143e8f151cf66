use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use peakmotifs_pipeline::{DefaultCmdRunner, PipelineConfig, run_pipeline};

fn parsed<T>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .get_one::<String>(name)
        .expect("argument has a default")
        .parse()
        .with_context(|| format!("invalid value for --{}", name))
}

pub fn run_pipeline_cmd(matches: &ArgMatches) -> Result<()> {
    let peaks = matches
        .get_one::<String>("peaks")
        .expect("A path to a peaks file is required.");
    let genome = matches
        .get_one::<String>("genome")
        .expect("A path to a genome FASTA is required.");
    let chrom_info = matches
        .get_one::<String>("chrom-info")
        .expect("A path to a chrom sizes file is required.");
    let output_dir = matches
        .get_one::<String>("output-dir")
        .expect("An output directory is required.");

    let chrom_filter: HashSet<String> = matches
        .get_many::<String>("chrom-filter")
        .unwrap_or_default()
        .cloned()
        .collect();
    let methyl_beds: Vec<PathBuf> = matches
        .get_many::<String>("methyl-beds")
        .unwrap_or_default()
        .map(PathBuf::from)
        .collect();
    let seed = matches
        .get_one::<String>("seed")
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("invalid value for --seed")?;

    let config = PipelineConfig {
        peaks: PathBuf::from(peaks),
        genome: PathBuf::from(genome),
        chrom_info: PathBuf::from(chrom_info),
        offset: parsed(matches, "offset")?,
        output_dir: PathBuf::from(output_dir),
        chrom_filter,
        shuffle_outputs_per_input: parsed(matches, "shuffle-outputs-per-input")?,
        shuffle_gc_tolerance: parsed(matches, "shuffle-gc-tolerance")?,
        methyl_beds,
        methyl_percent_threshold: parsed(matches, "methyl-percent-threshold")?,
        seed,
    };

    run_pipeline(&config, &DefaultCmdRunner)?;

    Ok(())
}
