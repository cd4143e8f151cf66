/// Length of sequences used for peak centers, flanks, and shuffled regions.
pub const SEQUENCE_LENGTH: usize = 100;

/// Half-width of the fixed window summit extraction builds around each
/// peak midpoint.
pub const SUMMIT_HALF_WIDTH: u64 = 150;

/// Number of top-ranked peaks handed to motif discovery; the next block
/// of the same size is held out for enrichment scoring.
pub const TOP_PEAK_COUNT: usize = 500;

/// Minimum usable peaks after cleaning; fewer aborts the run.
pub const MIN_USABLE_PEAKS: usize = 1000;

/// FASTA record name prefix for sampled background sequences.
pub const RANDOM_PREFIX: &str = "Random";

pub const CLEANED_BED_SUFFIX: &str = ".cleaned.bed";
pub const SUMMITS_FILE_SUFFIX: &str = ".summits.bed";
pub const TOP500_SEQS_SUFFIX: &str = ".top500.seqs";
pub const TOP500_SEQS_CENTER_SUFFIX: &str = ".top500.center.seqs";
pub const MEME_DIR_SUFFIX: &str = ".top500.center.meme";
pub const NEXT500_SEQS_SUFFIX: &str = ".next500.seqs";
pub const NEXT500_SEQS_CENTER_SUFFIX: &str = ".next500.center.seqs";
pub const NEXT500_SEQS_FLANK_SUFFIX: &str = ".next500.flank.seqs";
pub const CENTER_FIMO_DIR_SUFFIX: &str = ".next500.center.fimo";
pub const FLANK_FIMO_DIR_SUFFIX: &str = ".next500.flank.fimo";
pub const SHUFFLED_SEQS_SUFFIX: &str = ".shuffled.seqs";
pub const SHUFFLED_FIMO_DIR_SUFFIX: &str = ".shuffled.fimo";
pub const SEQS_SUFFIX: &str = ".seqs";
pub const FIMO_DIR_SUFFIX: &str = ".fimo";
pub const OCCURRENCES_SUFFIX: &str = ".occurrences.tsv";
pub const MOTIFS_JSON_SUFFIX: &str = ".motifs.json";

pub const MEME_TXT_FILENAME: &str = "meme.txt";
pub const MEME_XML_FILENAME: &str = "meme.xml";
pub const FIMO_TSV_FILENAME: &str = "fimo.tsv";
pub const FIMO_XML_FILENAME: &str = "fimo.xml";
pub const METHYL_ALPHABET_FILENAME: &str = "methyl_alphabet.txt";
