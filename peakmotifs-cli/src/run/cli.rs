use clap::{Arg, ArgAction, Command};

pub const RUN_CMD: &str = "run";

pub fn create_run_cli() -> Command {
    Command::new(RUN_CMD)
        .author("Genome Almanac")
        .about("Run the full motif discovery and validation pipeline for a peaks file.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("peaks")
                .long("peaks")
                .help("path to peaks in narrowPeak format, optionally gzipped")
                .required(true),
        )
        .arg(
            Arg::new("genome")
                .long("genome")
                .help("path to the indexed FASTA for this assembly")
                .required(true),
        )
        .arg(
            Arg::new("chrom-info")
                .long("chrom-info")
                .help("path to chromosome lengths for this assembly")
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("path to write output")
                .required(true),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .help("offset, in bp, to shift peaks")
                .default_value("0"),
        )
        .arg(
            Arg::new("chrom-filter")
                .long("chrom-filter")
                .help("chromosomes to filter out before running motif discovery")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("shuffle-outputs-per-input")
                .long("shuffle-outputs-per-input")
                .help("number of shuffled sequences to fetch per input sequence")
                .default_value("100"),
        )
        .arg(
            Arg::new("shuffle-gc-tolerance")
                .long("shuffle-gc-tolerance")
                .help("acceptable distance from input GC content for shuffled sequences, in percentage points (0-100)")
                .default_value("10"),
        )
        .arg(
            Arg::new("methyl-beds")
                .long("methyl-beds")
                .help("paths to optional methylation state @CpG bed files")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("methyl-percent-threshold")
                .long("methyl-percent-threshold")
                .help("the percentage at or over which a methylation site from the bed files is used")
                .default_value("0"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("random seed for background sampling, for reproducible runs"),
        )
}
