use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use log::{info, warn};

use peakmotifs_core::{ChromSizes, PeakSet};
use peakmotifs_io::PeakWrite;

///
/// Resize peaks to a fixed window around their midpoint and sort by
/// significance.
///
/// An optional `offset` first shifts each peak, clamped to the
/// chromosome. Records on unknown chromosomes, and records whose resized
/// window would leave the chromosome, are logged and dropped. Output is
/// sorted by q-value, then p-value, then signal.
///
pub fn summits(
    peaks: &Path,
    chrom_sizes: &ChromSizes,
    half_width: u64,
    out: &Path,
    offset: i64,
    chr_filter: Option<&HashSet<String>>,
) -> Result<PeakSet> {
    let raw = PeakSet::try_from(peaks)?;

    let mut resized = Vec::new();
    for peak in raw.iter() {
        if let Some(filter) = chr_filter {
            if filter.contains(&peak.chrom) {
                continue;
            }
        }
        let Some(&chrom_size) = chrom_sizes.get(&peak.chrom) else {
            warn!("no chromosome size for {}, dropping {}", peak.chrom, peak.name);
            continue;
        };

        let end = ((peak.end as i64 + offset).max(1) as u64).min(chrom_size);
        let start = ((peak.start as i64 + offset).max(0) as u64).min(end - 1);

        let midpoint = (start + end) / 2;
        if midpoint < half_width || midpoint + half_width > chrom_size {
            warn!(
                "resized window for {} leaves {}, dropping",
                peak.name, peak.chrom
            );
            continue;
        }

        let mut peak = peak.clone();
        peak.start = midpoint - half_width;
        peak.end = midpoint + half_width;
        resized.push(peak);
    }

    info!("kept {} of {} summit windows", resized.len(), raw.len());

    let mut summits = PeakSet::new(resized);
    summits.sort_by_significance();
    summits.write_bed(out)?;
    Ok(summits)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::path::PathBuf;

    use peakmotifs_core::ChromSizes;
    use pretty_assertions::assert_eq;

    fn write_peaks(dir: &Path, rows: &[(&str, u64, u64, &str, f64)]) -> PathBuf {
        let path = dir.join("in.bed");
        let mut file = std::fs::File::create(&path).unwrap();
        for (chrom, start, end, name, q) in rows {
            writeln!(file, "{chrom}\t{start}\t{end}\t{name}\t0\t.\t1.0\t2.0\t{q}\t50").unwrap();
        }
        path
    }

    fn sizes() -> ChromSizes {
        ChromSizes::from([("chr1".to_string(), 10_000u64)])
    }

    #[test]
    fn test_resizes_around_midpoint_and_sorts() {
        let tempdir = tempfile::tempdir().unwrap();
        let peaks = write_peaks(
            tempdir.path(),
            &[
                ("chr1", 1000, 1400, "a", 5.0),
                ("chr1", 2000, 2200, "b", 1.0),
            ],
        );
        let out = tempdir.path().join("summits.bed");

        let summits = summits(&peaks, &sizes(), 150, &out, 0, None).unwrap();

        // sorted by q-value: b first
        assert_eq!(summits.peaks[0].name, "b");
        assert_eq!(summits.peaks[0].start, 2100 - 150);
        assert_eq!(summits.peaks[0].end, 2100 + 150);
        assert_eq!(summits.peaks[1].name, "a");
        assert_eq!(summits.peaks[1].start, 1200 - 150);
        assert_eq!(summits.peaks[1].end, 1200 + 150);
    }

    #[test]
    fn test_drops_windows_off_the_chromosome() {
        let tempdir = tempfile::tempdir().unwrap();
        let peaks = write_peaks(
            tempdir.path(),
            &[
                ("chr1", 0, 100, "edge", 1.0),       // midpoint 50 < half width
                ("chr1", 9800, 10000, "tail", 1.0),  // window passes chromosome end
                ("chr1", 4000, 4200, "ok", 1.0),
                ("chr9", 4000, 4200, "nochrom", 1.0),
            ],
        );
        let out = tempdir.path().join("summits.bed");

        let summits = summits(&peaks, &sizes(), 150, &out, 0, None).unwrap();
        assert_eq!(summits.len(), 1);
        assert_eq!(summits.peaks[0].name, "ok");
    }

    #[test]
    fn test_offset_shifts_and_clamps() {
        let tempdir = tempfile::tempdir().unwrap();
        let peaks = write_peaks(tempdir.path(), &[("chr1", 9000, 9900, "x", 1.0)]);
        let out = tempdir.path().join("summits.bed");

        // end clamps to 10000, start shifts to 9500: midpoint 9750
        let summits = summits(&peaks, &sizes(), 100, &out, 500, None).unwrap();
        assert_eq!(summits.len(), 1);
        assert_eq!(summits.peaks[0].start, 9650);
        assert_eq!(summits.peaks[0].end, 9850);
    }
}
