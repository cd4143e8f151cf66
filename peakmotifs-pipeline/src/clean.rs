use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use log::info;

use peakmotifs_core::{MethylIndex, PeakSet};
use peakmotifs_io::PeakWrite;

use crate::errors::PipelineError;

///
/// Rewrite a narrowPeak file with sequential `peak_<n>` names, dropping
/// peaks on filtered-out chromosomes and, when a methylation index is
/// given, peaks containing no methylation site.
///
/// The renumbering matters because downstream joins (FIMO hits back to
/// peaks) key on the name column, which raw peak files may leave blank.
///
/// Fewer than `min_usable` surviving peaks aborts the run: the held-out
/// rank windows the statistics depend on would not exist.
///
pub fn clean_peaks(
    peaks: &Path,
    chr_filter: Option<&HashSet<String>>,
    methyl: Option<&MethylIndex>,
    out: &Path,
    min_usable: usize,
) -> Result<PeakSet> {
    let raw = PeakSet::try_from(peaks)?;

    let mut kept = Vec::new();
    for peak in raw.iter() {
        if let Some(filter) = chr_filter {
            if filter.contains(&peak.chrom) {
                continue;
            }
        }
        if let Some(methyl) = methyl {
            if !methyl.contains_site_in_range(&peak.chrom, peak.start, peak.end) {
                continue;
            }
        }
        let mut peak = peak.clone();
        peak.name = format!("peak_{}", kept.len());
        kept.push(peak);
    }

    if kept.len() < min_usable {
        return Err(PipelineError::NotEnoughPeaks {
            found: kept.len(),
            required: min_usable,
        }
        .into());
    }

    info!("kept {} of {} peaks", kept.len(), raw.len());
    let cleaned = PeakSet::new(kept);
    cleaned.write_bed(out)?;
    Ok(cleaned)
}
