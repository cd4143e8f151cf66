use clap::{Arg, Command};

pub const QUALITY_CMD: &str = "quality";

pub fn create_quality_cli() -> Command {
    Command::new(QUALITY_CMD)
        .author("Genome Almanac")
        .about("Assemble the motifs report from existing MEME and FIMO output directories.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("meme-xml")
                .long("meme-xml")
                .help("path to the meme.xml of the discovery run")
                .required(true),
        )
        .arg(
            Arg::new("peaks-fimo-dir")
                .long("peaks-fimo-dir")
                .help("FIMO output directory for the original cleaned peaks")
                .required(true),
        )
        .arg(
            Arg::new("center-fimo-dir")
                .long("center-fimo-dir")
                .help("FIMO output directory for the held-out peak centers")
                .required(true),
        )
        .arg(
            Arg::new("shuffled-fimo-dir")
                .long("shuffled-fimo-dir")
                .help("FIMO output directory for the shuffled background sequences")
                .required(true),
        )
        .arg(
            Arg::new("flank-fimo-dir")
                .long("flank-fimo-dir")
                .help("FIMO output directory for the held-out peak flanks")
                .required(true),
        )
        .arg(
            Arg::new("peaks")
                .long("peaks")
                .help("the cleaned peaks file the original scan ran against")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .help("path to write the motifs json")
                .required(true),
        )
}
