use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::Result;
use log::{info, warn};

use crate::utils::get_dynamic_reader;

/// Column holding the methylation percentage in evidence bed files.
const PERCENT_COLUMN: usize = 10;

///
/// Per-chromosome index of methylated base positions.
///
/// Positions are kept sorted and duplicate-free per chromosome so range
/// queries run as binary searches. The index is built once from one or
/// more evidence files and is read-only afterwards, so it can be shared
/// freely between pipeline stages.
///
/// A CpG dinucleotide arrives as two records one bp apart; they collapse
/// into a single site keyed at the first base. Within one file the pair
/// keeps the larger of the two percentages; across replicate files the
/// per-site percentage is averaged (absent observations count as 0%)
/// before the threshold comparison.
///
#[derive(Clone, Debug, Default)]
pub struct MethylIndex {
    sites: HashMap<String, Vec<u64>>,
}

impl MethylIndex {
    ///
    /// Build the index from evidence files, keeping sites whose (averaged)
    /// methylation percentage is at least `percent_threshold`.
    ///
    /// A malformed line is logged and skipped. Zero usable lines produce
    /// an empty index, which simply answers "no site" to every query.
    ///
    pub fn from_files<P: AsRef<Path>>(paths: &[P], percent_threshold: f64) -> Result<Self> {
        if paths.is_empty() {
            return Ok(MethylIndex::default());
        }

        let mut totals: HashMap<String, HashMap<u64, f64>> = HashMap::new();

        for path in paths {
            for (chrom, pos, percent) in parse_evidence_file(path.as_ref())? {
                *totals.entry(chrom).or_default().entry(pos).or_insert(0.0) += percent;
            }
        }

        let file_count = paths.len() as f64;
        let mut sites: HashMap<String, Vec<u64>> = HashMap::new();
        for (chrom, positions) in totals {
            let mut kept: Vec<u64> = positions
                .into_iter()
                .filter(|(_, total)| total / file_count >= percent_threshold)
                .map(|(pos, _)| pos)
                .collect();
            if kept.is_empty() {
                continue;
            }
            kept.sort_unstable();
            kept.dedup();
            sites.insert(chrom, kept);
        }

        if sites.is_empty() {
            info!("no methylation sites passed the {percent_threshold}% threshold");
        }

        Ok(MethylIndex { sites })
    }

    /// Build directly from per-chromosome positions; sorts and dedups.
    pub fn from_sites(sites: HashMap<String, Vec<u64>>) -> Self {
        let sites = sites
            .into_iter()
            .map(|(chrom, mut positions)| {
                positions.sort_unstable();
                positions.dedup();
                (chrom, positions)
            })
            .collect();
        MethylIndex { sites }
    }

    pub fn site_count(&self) -> usize {
        self.sites.values().map(Vec::len).sum()
    }

    ///
    /// True if at least one site lies in `[start - 1, end]` (both
    /// inclusive). The extra base on the left accounts for paired-base
    /// evidence: the complementary G of a qualifying CpG may sit one
    /// position before `start`.
    ///
    pub fn contains_site_in_range(&self, chrom: &str, start: u64, end: u64) -> bool {
        let Some(positions) = self.sites.get(chrom) else {
            return false;
        };
        let low = start.saturating_sub(1);
        let idx = positions.partition_point(|&p| p < low);
        idx < positions.len() && positions[idx] <= end
    }

    ///
    /// Replace methylated CG pairs in `sequence` (whose first base sits at
    /// genomic position `start` on `chrom`) with their single-letter
    /// methylation codes: `c -> m`, `C -> M`, `g -> w`, `G -> W`.
    ///
    /// Both the site base and its adjacent partner are rewritten when they
    /// fall inside the sequence. Any other base at a flagged offset is an
    /// upstream data anomaly: it is logged and left unchanged.
    ///
    pub fn substitute_methylated_bases(&self, sequence: &str, chrom: &str, start: u64) -> String {
        if sequence.is_empty() {
            return String::new();
        }
        let Some(positions) = self.sites.get(chrom) else {
            return sequence.to_string();
        };

        let end = start + sequence.len() as u64 - 1;
        let low = start.saturating_sub(1);
        let from = positions.partition_point(|&p| p < low);
        let to = positions.partition_point(|&p| p <= end);

        let mut bases = sequence.as_bytes().to_vec();
        for &site in &positions[from..to] {
            // site is the C of the pair; site + 1 its G partner
            for pos in [site, site + 1] {
                if pos < start || pos > end {
                    continue;
                }
                let offset = (pos - start) as usize;
                bases[offset] = match bases[offset] {
                    b'c' => b'm',
                    b'C' => b'M',
                    b'g' => b'w',
                    b'G' => b'W',
                    other => {
                        warn!(
                            "unexpected base '{}' at methylated position {}:{}",
                            other as char, chrom, pos
                        );
                        other
                    }
                };
            }
        }

        String::from_utf8(bases).expect("substitution maps ascii to ascii")
    }
}

/// Parse one evidence file into `(chrom, position, percent)` sites, with
/// CpG pairs already collapsed onto their first base.
fn parse_evidence_file(path: &Path) -> Result<Vec<(String, u64, f64)>> {
    let reader = get_dynamic_reader(path)?;

    let mut collapsed: Vec<(String, u64, f64)> = Vec::new();
    let mut pending: Option<(String, u64, f64)> = None;
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.trim().split('\t').collect();
        let parsed = (|| {
            let chrom = fields.first()?.to_string();
            let pos = fields.get(1)?.parse::<u64>().ok()?;
            let percent = fields.get(PERCENT_COLUMN)?.parse::<f64>().ok()?;
            Some((chrom, pos, percent))
        })();

        let Some((chrom, pos, percent)) = parsed else {
            warn!(
                "skipping malformed methylation line {} in {:?}: {}",
                index + 1,
                path,
                line
            );
            skipped += 1;
            continue;
        };

        pending = match pending.take() {
            Some((prev_chrom, prev_pos, prev_percent))
                if prev_chrom == chrom && pos == prev_pos + 1 =>
            {
                // second half of a CpG pair: collapse onto the first base
                collapsed.push((prev_chrom, prev_pos, prev_percent.max(percent)));
                None
            }
            Some(prev) => {
                collapsed.push(prev);
                Some((chrom, pos, percent))
            }
            None => Some((chrom, pos, percent)),
        };
    }
    if let Some(prev) = pending {
        collapsed.push(prev);
    }

    if skipped > 0 {
        warn!("skipped {} malformed lines in {:?}", skipped, path);
    }

    Ok(collapsed)
}
