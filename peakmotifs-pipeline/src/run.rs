use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use peakmotifs_core::{MethylIndex, parse_chrom_sizes};
use peakmotifs_core::utils::remove_all_extensions;
use peakmotifs_io::IndexedFastaGenome;

use crate::background::random_sequences;
use crate::clean::clean_peaks;
use crate::consts::*;
use crate::occurrences::occurrences_tsv;
use crate::report::motif_json;
use crate::sequences::peaks_to_fasta;
use crate::summits::summits;
use crate::tools::{CmdRunner, DEFAULT_MEME_OPTIONS, fasta_center, fimo, meme};

///
/// Everything one full pipeline run needs. Mirrors the CLI surface.
///
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub peaks: PathBuf,
    pub genome: PathBuf,
    pub chrom_info: PathBuf,
    pub offset: i64,
    pub output_dir: PathBuf,
    pub chrom_filter: HashSet<String>,
    pub shuffle_outputs_per_input: usize,
    pub shuffle_gc_tolerance: u32,
    pub methyl_beds: Vec<PathBuf>,
    pub methyl_percent_threshold: f64,
    pub seed: Option<u64>,
}

impl PipelineConfig {
    fn out_file(&self, prefix: &str, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{prefix}{suffix}"))
    }
}

///
/// Run the whole pipeline: clean -> summits -> discovery inputs -> MEME ->
/// held-out/flank/background scans -> occurrences -> report.
///
/// Returns the path of the final `motifs.json`.
///
pub fn run_pipeline(config: &PipelineConfig, runner: &dyn CmdRunner) -> Result<PathBuf> {
    info!(
        "running motif pipeline for {:?} into {:?}",
        config.peaks, config.output_dir
    );
    let prefix = remove_all_extensions(&config.peaks);
    let chrom_sizes = parse_chrom_sizes(&config.chrom_info)?;

    let methyl = if config.methyl_beds.is_empty() {
        None
    } else {
        info!("building methylation index from {} files", config.methyl_beds.len());
        Some(MethylIndex::from_files(
            &config.methyl_beds,
            config.methyl_percent_threshold,
        )?)
    };
    let methyl = methyl.as_ref();

    // one genome reader serves every sequence-reading stage of the run
    let mut genome = IndexedFastaGenome::open(&config.genome)
        .with_context(|| format!("opening genome {:?}", config.genome))?;

    info!("creating cleaned peaks file");
    let chr_filter = (!config.chrom_filter.is_empty()).then_some(&config.chrom_filter);
    let cleaned = config.out_file(&prefix, CLEANED_BED_SUFFIX);
    clean_peaks(&config.peaks, chr_filter, methyl, &cleaned, MIN_USABLE_PEAKS)?;

    info!("creating peak summits file");
    let summits_file = config.out_file(&prefix, SUMMITS_FILE_SUFFIX);
    summits(
        &cleaned,
        &chrom_sizes,
        SUMMIT_HALF_WIDTH,
        &summits_file,
        config.offset,
        chr_filter,
    )?;

    info!("extracting top {} summit sequences", TOP_PEAK_COUNT);
    let top_seqs = config.out_file(&prefix, TOP500_SEQS_SUFFIX);
    let top_center_seqs = config.out_file(&prefix, TOP500_SEQS_CENTER_SUFFIX);
    peaks_to_fasta(&summits_file, &mut genome, &top_seqs, methyl, Some(0..TOP_PEAK_COUNT))?;
    fasta_center(runner, &top_seqs, SEQUENCE_LENGTH, None, &top_center_seqs)?;

    info!("running meme on top {} centered peaks", TOP_PEAK_COUNT);
    let meme_dir = config.out_file(&prefix, MEME_DIR_SUFFIX);
    meme(runner, &top_center_seqs, &meme_dir, methyl.is_some(), DEFAULT_MEME_OPTIONS)?;
    let meme_txt = meme_dir.join(MEME_TXT_FILENAME);

    info!("generating held-out peak centers and flanks");
    let next_seqs = config.out_file(&prefix, NEXT500_SEQS_SUFFIX);
    let next_center_seqs = config.out_file(&prefix, NEXT500_SEQS_CENTER_SUFFIX);
    let next_flank_seqs = config.out_file(&prefix, NEXT500_SEQS_FLANK_SUFFIX);
    peaks_to_fasta(
        &summits_file,
        &mut genome,
        &next_seqs,
        methyl,
        Some(TOP_PEAK_COUNT..2 * TOP_PEAK_COUNT),
    )?;
    fasta_center(
        runner,
        &next_seqs,
        SEQUENCE_LENGTH,
        Some(&next_flank_seqs),
        &next_center_seqs,
    )?;

    info!("scanning held-out centers and flanks");
    let center_fimo_dir = config.out_file(&prefix, CENTER_FIMO_DIR_SUFFIX);
    fimo(runner, &meme_txt, &next_center_seqs, &center_fimo_dir)?;
    let flank_fimo_dir = config.out_file(&prefix, FLANK_FIMO_DIR_SUFFIX);
    fimo(runner, &meme_txt, &next_flank_seqs, &flank_fimo_dir)?;

    info!("generating shuffled background sequences");
    let shuffled_seqs = config.out_file(&prefix, SHUFFLED_SEQS_SUFFIX);
    random_sequences(
        &mut genome,
        &top_center_seqs,
        &shuffled_seqs,
        config.shuffle_outputs_per_input,
        &chrom_sizes,
        config.shuffle_gc_tolerance,
        methyl,
        config.seed,
    )?;
    let shuffled_fimo_dir = config.out_file(&prefix, SHUFFLED_FIMO_DIR_SUFFIX);
    fimo(runner, &meme_txt, &shuffled_seqs, &shuffled_fimo_dir)?;

    info!("scanning original cleaned peaks");
    let original_seqs = config.out_file(&prefix, SEQS_SUFFIX);
    peaks_to_fasta(&cleaned, &mut genome, &original_seqs, methyl, None)?;
    let original_fimo_dir = config.out_file(&prefix, FIMO_DIR_SUFFIX);
    fimo(runner, &meme_txt, &original_seqs, &original_fimo_dir)?;

    info!("writing occurrences table");
    let occurrences_out = config.out_file(&prefix, OCCURRENCES_SUFFIX);
    occurrences_tsv(
        &original_fimo_dir.join(FIMO_TSV_FILENAME),
        &cleaned,
        &occurrences_out,
    )?;

    info!("assembling motifs report");
    let out_json = config.out_file(&prefix, MOTIFS_JSON_SUFFIX);
    motif_json(
        &meme_dir.join(MEME_XML_FILENAME),
        &original_fimo_dir,
        &center_fimo_dir,
        &shuffled_fimo_dir,
        &flank_fimo_dir,
        &cleaned,
        &out_json,
    )?;

    info!("pipeline complete: {:?}", out_json);
    Ok(out_json)
}
