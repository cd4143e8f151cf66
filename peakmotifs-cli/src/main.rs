mod quality;
mod run;
mod sample;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "peakmotifs";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Genome Almanac")
        .about("Discover and statistically validate DNA sequence motifs enriched in regulatory protein-binding peaks.")
        .subcommand_required(true)
        .subcommand(run::cli::create_run_cli())
        .subcommand(sample::cli::create_sample_cli())
        .subcommand(quality::cli::create_quality_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // FULL PIPELINE
        //
        Some((run::cli::RUN_CMD, matches)) => {
            run::handlers::run_pipeline_cmd(matches)?;
        }

        //
        // BACKGROUND SAMPLING ONLY
        //
        Some((sample::cli::SAMPLE_CMD, matches)) => {
            sample::handlers::run_sample(matches)?;
        }

        //
        // REPORT ASSEMBLY FROM EXISTING TOOL OUTPUT
        //
        Some((quality::cli::QUALITY_CMD, matches)) => {
            quality::handlers::run_quality(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
