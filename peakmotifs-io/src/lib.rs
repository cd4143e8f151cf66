//! File-format io for the peakmotifs pipeline: genome sequence access
//! through an indexed FASTA, FASTA reading/writing, narrowPeak writing,
//! and parsers for the MEME and FIMO result files the external tools
//! produce.

pub mod fasta;
pub mod fimo;
pub mod genome;
pub mod meme;
pub mod peaks;

pub use fasta::{read_fasta_sequences, write_fasta_record};
pub use fimo::{FimoHit, parse_num_sequences, read_fimo_tsv};
pub use genome::{GenomeAccessor, InMemoryGenome, IndexedFastaGenome};
pub use meme::{MemeData, MemeMotif, parse_meme_xml};
pub use peaks::PeakWrite;
