use std::path::Path;

use anyhow::Result;
use clap::ArgMatches;
use log::info;

use peakmotifs_pipeline::motif_json;

pub fn run_quality(matches: &ArgMatches) -> Result<()> {
    let arg = |name: &str| {
        Path::new(
            matches
                .get_one::<String>(name)
                .expect("argument is required")
                .as_str(),
        )
    };

    let report = motif_json(
        arg("meme-xml"),
        arg("peaks-fimo-dir"),
        arg("center-fimo-dir"),
        arg("shuffled-fimo-dir"),
        arg("flank-fimo-dir"),
        arg("peaks"),
        arg("output"),
    )?;
    info!("report contains {} motifs", report.motifs.len());

    Ok(())
}
