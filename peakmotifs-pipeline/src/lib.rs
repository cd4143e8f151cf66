//! The peakmotifs pipeline: stage functions that connect peak cleaning,
//! summit extraction, sequence generation, the external MEME-suite tools,
//! background sampling, and the final enrichment report.
//!
//! Stages communicate through files, so each one can also be run (and
//! tested) on its own. The only fatal condition is too few usable peaks
//! after cleaning; everything else degrades record by record with a
//! logged warning.

pub mod background;
pub mod clean;
pub mod consts;
pub mod errors;
pub mod occurrences;
pub mod report;
pub mod run;
pub mod sequences;
pub mod summits;
pub mod tools;

pub use background::random_sequences;
pub use clean::clean_peaks;
pub use errors::PipelineError;
pub use occurrences::occurrences_tsv;
pub use report::motif_json;
pub use run::{PipelineConfig, run_pipeline};
pub use sequences::peaks_to_fasta;
pub use summits::summits;
pub use tools::{CmdRunner, DefaultCmdRunner, fasta_center, fimo, meme};
