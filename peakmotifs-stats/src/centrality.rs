use std::collections::{BTreeMap, HashMap};

use log::warn;

use peakmotifs_core::PeakSet;
use peakmotifs_io::FimoHit;

/// Summit offsets keyed by peak name, for joining scan hits back to
/// their peaks.
pub fn summit_offsets(peaks: &PeakSet) -> HashMap<String, i64> {
    peaks
        .iter()
        .map(|peak| (peak.name.clone(), peak.summit_offset))
        .collect()
}

///
/// Distribution of motif occurrence distances from peak summits.
///
/// For every hit, the occurrence midpoint within its peak sequence is
/// rounded with ceiling on the reverse strand and floor on the forward
/// strand (the strand asymmetry would otherwise introduce a systematic
/// half-base bias), and the signed distance from the summit offset to
/// that midpoint is accumulated; reverse-strand distances flip sign.
/// Each motif's histogram is normalized to sum to 1.
///
pub fn peak_centrality(
    hits: &[FimoHit],
    summits: &HashMap<String, i64>,
) -> HashMap<String, BTreeMap<i64, f64>> {
    let mut counts: HashMap<String, BTreeMap<i64, u64>> = HashMap::new();

    for hit in hits {
        let Some(&summit) = summits.get(&hit.sequence_id) else {
            warn!(
                "hit for motif {} names unknown peak {}, skipping",
                hit.motif_id, hit.sequence_id
            );
            continue;
        };

        let midpoint = (hit.start + hit.stop) as f64 / 2.0;
        let midpoint = if hit.strand == '-' {
            midpoint.ceil() as i64
        } else {
            midpoint.floor() as i64
        };

        let mut distance = summit - midpoint;
        if hit.strand == '-' {
            distance = -distance;
        }

        *counts
            .entry(hit.motif_id.clone())
            .or_default()
            .entry(distance)
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(motif, histogram)| {
            let total: u64 = histogram.values().sum();
            let normalized = histogram
                .into_iter()
                .map(|(distance, count)| (distance, count as f64 / total as f64))
                .collect();
            (motif, normalized)
        })
        .collect()
}
