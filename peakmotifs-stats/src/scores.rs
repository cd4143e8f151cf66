use std::collections::{HashMap, HashSet};

use statrs::function::erf::erf;

use peakmotifs_io::FimoHit;

///
/// Occurrence counts for one motif against one scanned sequence set. A
/// sequence contributes at most one count no matter how many hits it has.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OccurrenceTable {
    pub sequences_with_hit: u32,
    pub total_sequences: u32,
}

impl OccurrenceTable {
    pub fn new(sequences_with_hit: u32, total_sequences: u32) -> Self {
        OccurrenceTable {
            sequences_with_hit,
            total_sequences,
        }
    }

    /// Fraction of scanned sequences with at least one hit; 0 for an
    /// empty set rather than a division by zero.
    pub fn ratio(&self) -> f64 {
        if self.total_sequences == 0 {
            return 0.0;
        }
        f64::from(self.sequences_with_hit) / f64::from(self.total_sequences)
    }
}

///
/// Count distinct sequences with a hit per motif. Every requested motif
/// gets a table (zero occurrences if it never appears in `hits`); hits
/// for motifs outside `motif_names` are ignored.
///
pub fn count_occurrences(
    hits: &[FimoHit],
    motif_names: &[String],
    total_sequences: u32,
) -> HashMap<String, OccurrenceTable> {
    let mut seen: HashMap<&str, HashSet<&str>> = motif_names
        .iter()
        .map(|name| (name.as_str(), HashSet::new()))
        .collect();

    for hit in hits {
        if let Some(sequences) = seen.get_mut(hit.motif_id.as_str()) {
            sequences.insert(hit.sequence_id.as_str());
        }
    }

    seen.into_iter()
        .map(|(motif, sequences)| {
            (
                motif.to_string(),
                OccurrenceTable::new(sequences.len() as u32, total_sequences),
            )
        })
        .collect()
}

///
/// Pooled two-proportion z-score between a test and a control table.
///
/// A degenerate pool (no occurrences anywhere, or a hit in every single
/// sequence) has zero variance and carries no enrichment signal, so it
/// yields z = 0 instead of a NaN.
///
pub fn compare_proportions(test: &OccurrenceTable, control: &OccurrenceTable) -> f64 {
    if test.total_sequences == 0 || control.total_sequences == 0 {
        return 0.0;
    }

    let pooled = f64::from(test.sequences_with_hit + control.sequences_with_hit)
        / f64::from(test.total_sequences + control.total_sequences);
    if pooled <= 0.0 || pooled >= 1.0 {
        return 0.0;
    }

    (test.ratio() - control.ratio())
        / (pooled
            * (1.0 - pooled)
            * (1.0 / f64::from(test.total_sequences) + 1.0 / f64::from(control.total_sequences)))
        .sqrt()
}

///
/// p-value for a z-score, folded to the smaller tail:
/// `x = (1 + erf(z/sqrt(2))) / 2`, then `x` if `x <= 0.5` else `1 - x`.
///
/// This is deliberately not the doubled two-tailed value; downstream
/// consumers of the report depend on this exact convention.
///
pub fn z_score_to_p_value(z_score: f64) -> f64 {
    let x = (1.0 + erf(z_score / std::f64::consts::SQRT_2)) / 2.0;
    if x > 0.5 { 1.0 - x } else { x }
}
