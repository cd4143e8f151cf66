//! Motif enrichment statistics.
//!
//! Pure computation over already-parsed scan results: occurrence tables
//! and their ratios, pooled two-proportion z-scores with the smaller-tail
//! p-value transform, summit centrality distributions, and assembly of
//! the final per-motif report.

pub mod centrality;
pub mod report;
pub mod scores;

pub use centrality::{peak_centrality, summit_offsets};
pub use report::{MotifControlData, MotifData, OutputMotif, assemble_report};
pub use scores::{OccurrenceTable, compare_proportions, count_occurrences, z_score_to_p_value};
