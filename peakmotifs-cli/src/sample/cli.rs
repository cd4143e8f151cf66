use clap::{Arg, ArgAction, Command};

pub const SAMPLE_CMD: &str = "sample";

pub fn create_sample_cli() -> Command {
    Command::new(SAMPLE_CMD)
        .author("Genome Almanac")
        .about("Sample GC-matched background sequences from the genome for a treatment FASTA.")
        .arg_required_else_help(true)
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
            Arg::new("input-fasta")
                .long("input-fasta")
                .help("treatment sequences to match; all records must share one length")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .help("path to write the sampled FASTA")
                .required(true),
        )
        .arg(
            Arg::new("outputs-per-input")
                .long("outputs-per-input")
                .help("number of sampled sequences per input sequence")
                .default_value("100"),
        )
        .arg(
            Arg::new("gc-tolerance")
                .long("gc-tolerance")
                .help("acceptable GC distance in percentage points (0-100)")
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
                .help("random seed, for reproducible sampling"),
        )
}
