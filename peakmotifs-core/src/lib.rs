//! Core types for the peakmotifs pipeline: narrowPeak records and peak
//! sets, chromosome size tables, and the methylation site index shared by
//! the cleaning, sequence-extraction, and background-sampling stages.

pub mod errors;
pub mod methyl;
pub mod models;
pub mod utils;

pub use errors::PeakFileError;
pub use methyl::MethylIndex;
pub use models::chrom_sizes::{ChromSizes, parse_chrom_sizes};
pub use models::peak::{PeakRecord, PeakSet};
