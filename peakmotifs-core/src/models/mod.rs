pub mod chrom_sizes;
pub mod peak;

pub use chrom_sizes::{ChromSizes, parse_chrom_sizes};
pub use peak::{PeakRecord, PeakSet};
