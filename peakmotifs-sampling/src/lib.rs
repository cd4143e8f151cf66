//! GC-content-matched background sampling.
//!
//! Control sequences for motif enrichment scoring have to match the
//! treatment set's length and GC profile, otherwise the comparison just
//! measures base composition. The sampler here makes a single pass over
//! the reference genome in fixed windows, offering each window to the
//! treatment buckets whose GC content it matches, and keeps per-bucket
//! reservoirs so every qualifying window ends up in the output with equal
//! probability regardless of scan order. Memory stays proportional to the
//! number of accepted candidates.

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rand::prelude::*;

use peakmotifs_core::{ChromSizes, MethylIndex};
use peakmotifs_io::GenomeAccessor;

/// Candidates must have a methylation site within this many bp of the
/// window midpoint when methylation filtering is active.
pub const METHYL_PROXIMITY_WINDOW: u64 = 500;

///
/// One sampled background sequence and where it came from.
///
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateSequence {
    pub bases: String,
    pub chrom: String,
    /// 0-based, end-exclusive genomic interval.
    pub start: u64,
    pub end: u64,
}

/// GC percentage (0-100) of a sequence, counting methylated codes (m/w)
/// as their underlying G/C.
pub fn gc_content_percent(sequence: &str) -> u32 {
    if sequence.is_empty() {
        return 0;
    }
    let gc = sequence
        .bytes()
        .filter(|b| matches!(b.to_ascii_lowercase(), b'g' | b'c' | b'm' | b'w'))
        .count();
    (gc * 100 / sequence.len()) as u32
}

/// Reservoir of accepted windows for one treatment sequence.
#[derive(Debug)]
struct GcBucket {
    gc_content: u32,
    outputs: Vec<CandidateSequence>,
    offers_seen: u64,
}

impl GcBucket {
    fn new(gc_content: u32) -> Self {
        GcBucket {
            gc_content,
            outputs: Vec::new(),
            offers_seen: 0,
        }
    }
}

///
/// Single-pass background sequence sampler.
///
/// Built once per run with the scan parameters; [BackgroundSampler::sample]
/// walks the genome chromosome by chromosome in fixed, non-overlapping
/// windows of the treatment sequence length and fills one reservoir per
/// treatment sequence with up to `outputs_per_input` GC-matched windows.
///
pub struct BackgroundSampler<'a> {
    chrom_sizes: &'a ChromSizes,
    outputs_per_input: usize,
    gc_tolerance: u32,
    methyl: Option<&'a MethylIndex>,
    rng: StdRng,
}

impl<'a> BackgroundSampler<'a> {
    ///
    /// # Arguments
    /// * `chrom_sizes` - chromosome lengths for the assembly to scan
    /// * `outputs_per_input` - reservoir capacity K per treatment sequence
    /// * `gc_tolerance` - acceptable GC distance, in percentage points
    /// * `methyl` - when set, windows need a site near their midpoint and
    ///   get methylated-base substitution before GC matching
    /// * `seed` - optional random seed for reproducibility
    ///
    pub fn new(
        chrom_sizes: &'a ChromSizes,
        outputs_per_input: usize,
        gc_tolerance: u32,
        methyl: Option<&'a MethylIndex>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        BackgroundSampler {
            chrom_sizes,
            outputs_per_input,
            gc_tolerance,
            methyl,
            rng,
        }
    }

    ///
    /// Scan the genome once and return the accepted candidates, flattened
    /// across buckets. Never returns more than
    /// `treatment.len() * outputs_per_input` sequences; a shortfall is
    /// reported with a single aggregate warning, not an error.
    ///
    pub fn sample<G: GenomeAccessor>(
        &mut self,
        genome: &mut G,
        treatment: &[String],
    ) -> Result<Vec<CandidateSequence>> {
        if treatment.is_empty() || self.outputs_per_input == 0 {
            return Ok(Vec::new());
        }

        let sequence_length = treatment[0].len() as u64;
        if sequence_length == 0 {
            bail!("treatment sequences are empty");
        }
        if treatment.iter().any(|s| s.len() as u64 != sequence_length) {
            bail!("treatment sequences must all have the same length");
        }

        let mut buckets: Vec<GcBucket> = treatment
            .iter()
            .map(|s| GcBucket::new(gc_content_percent(s)))
            .collect();
        buckets.sort_by_key(|b| b.gc_content);

        // sorted scan order keeps seeded runs reproducible
        let chrom_sizes = self.chrom_sizes;
        let mut chroms: Vec<(&String, &u64)> = chrom_sizes.iter().collect();
        chroms.sort();

        let progress = ProgressBar::new(chroms.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} chromosomes scanned")
                .unwrap(),
        );

        for (chrom, &chrom_length) in chroms {
            let mut start = 0u64;
            while start + sequence_length < chrom_length {
                match genome.load_fragment(chrom, start, sequence_length) {
                    Ok(window) => self.offer(&mut buckets, chrom, start, window),
                    Err(e) => warn!(
                        "skipping window {}:{}-{}: {}",
                        chrom,
                        start,
                        start + sequence_length,
                        e
                    ),
                }
                start += sequence_length;
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        let missing: usize = buckets
            .iter()
            .map(|b| self.outputs_per_input - b.outputs.len())
            .sum();
        if missing > 0 {
            warn!(
                "could not find enough sequences matching GC content of inputs; missing sequences: {}",
                missing
            );
        }

        Ok(buckets.into_iter().flat_map(|b| b.outputs).collect())
    }

    /// Offer one genome window to the buckets it GC-matches.
    fn offer(&mut self, buckets: &mut [GcBucket], chrom: &str, start: u64, window: String) {
        let end = start + window.len() as u64;

        let sequence = match self.methyl {
            Some(methyl) => {
                let center = (start + end - 1) / 2;
                let near_start = center.saturating_sub(METHYL_PROXIMITY_WINDOW);
                let near_end = center + METHYL_PROXIMITY_WINDOW;
                if !methyl.contains_site_in_range(chrom, near_start, near_end) {
                    return;
                }
                methyl.substitute_methylated_bases(&window, chrom, start)
            }
            None => window,
        };

        let gc = gc_content_percent(&sequence);
        let low = buckets.partition_point(|b| b.gc_content < gc.saturating_sub(self.gc_tolerance));
        let high = buckets.partition_point(|b| b.gc_content <= gc + self.gc_tolerance);
        if low == high {
            return;
        }

        let candidate = CandidateSequence {
            bases: sequence,
            chrom: chrom.to_string(),
            start,
            end,
        };

        // fill any matching bucket that still has room
        if let Some(bucket) = buckets[low..high]
            .iter_mut()
            .find(|b| b.outputs.len() < self.outputs_per_input)
        {
            bucket.outputs.push(candidate);
            return;
        }

        // all matching buckets full: pick one uniformly and run the
        // reservoir replacement step, keeping every offer equally likely
        // to be a final occupant
        let bucket = &mut buckets[self.rng.gen_range(low..high)];
        bucket.offers_seen += 1;
        let slot = self
            .rng
            .gen_range(0..self.outputs_per_input as u64 + bucket.offers_seen);
        if (slot as usize) < self.outputs_per_input {
            bucket.outputs[slot as usize] = candidate;
        }
    }
}
