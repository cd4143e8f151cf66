use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::warn;

use crate::errors::PeakFileError;
use crate::utils::get_dynamic_reader;

///
/// One record of a narrowPeak file: a called binding-site candidate with
/// its signal statistics and the summit offset from the region start.
///
/// Coordinates follow the BED convention: 0-based, end-exclusive.
///
#[derive(Clone, Debug, PartialEq)]
pub struct PeakRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub score: u32,
    pub strand: char,
    pub signal_value: f64,
    pub p_value: f64,
    pub q_value: f64,
    /// Offset of the point-source summit from `start`; -1 when not called.
    pub summit_offset: i64,
}

impl PeakRecord {
    /// Absolute genomic position of the summit.
    pub fn summit_position(&self) -> u64 {
        (self.start as i64 + self.summit_offset).max(0) as u64
    }

    pub fn midpoint(&self) -> u64 {
        (self.start + self.end) / 2
    }

    fn parse_line(line: &str, line_number: usize) -> Result<Self, PeakFileError> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < 10 {
            return Err(PeakFileError::FieldCount {
                line_number,
                found: fields.len(),
            });
        }

        fn field<T: std::str::FromStr>(
            raw: &str,
            name: &'static str,
            line_number: usize,
        ) -> Result<T, PeakFileError> {
            raw.parse().map_err(|_| PeakFileError::InvalidField {
                line_number,
                field: name,
                value: raw.to_string(),
            })
        }

        Ok(PeakRecord {
            chrom: fields[0].to_string(),
            start: field(fields[1], "start", line_number)?,
            end: field(fields[2], "end", line_number)?,
            name: fields[3].to_string(),
            score: field(fields[4], "score", line_number)?,
            strand: fields[5].chars().next().unwrap_or('.'),
            signal_value: field(fields[6], "signalValue", line_number)?,
            p_value: field(fields[7], "pValue", line_number)?,
            q_value: field(fields[8], "qValue", line_number)?,
            summit_offset: field(fields[9], "peak", line_number)?,
        })
    }
}

impl Display for PeakRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.name,
            self.score,
            self.strand,
            self.signal_value,
            self.p_value,
            self.q_value,
            self.summit_offset
        )
    }
}

///
/// PeakSet struct, the in-memory representation of a narrowPeak file.
///
#[derive(Clone, Debug, Default)]
pub struct PeakSet {
    pub peaks: Vec<PeakRecord>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for PeakSet {
    type Error = anyhow::Error;

    ///
    /// Create a new [PeakSet] from a narrowPeak file, plain or gzipped.
    ///
    /// Comment lines and track headers are ignored. A malformed record is
    /// logged and skipped; only an unreadable file is an error.
    ///
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;

        let mut peaks = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }
            match PeakRecord::parse_line(&line, index + 1) {
                Ok(peak) => peaks.push(peak),
                Err(e) => warn!("skipping malformed peak in {:?}: {}", value, e),
            }
        }

        if peaks.is_empty() {
            return Err(PeakFileError::EmptyPeakSet(value.display().to_string()).into());
        }

        Ok(PeakSet {
            peaks,
            path: Some(value.to_path_buf()),
        })
    }
}

impl PeakSet {
    pub fn new(peaks: Vec<PeakRecord>) -> Self {
        PeakSet { peaks, path: None }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Sort by q-value, then p-value, then signal, ascending. This is the
    /// rank order used to pick the top peaks for motif discovery.
    pub fn sort_by_significance(&mut self) {
        self.peaks.sort_by(|a, b| {
            a.q_value
                .total_cmp(&b.q_value)
                .then(a.p_value.total_cmp(&b.p_value))
                .then(a.signal_value.total_cmp(&b.signal_value))
        });
    }

    /// Records whose rank (file order) falls within `range`.
    pub fn rank_range(&self, range: std::ops::Range<usize>) -> &[PeakRecord] {
        let start = range.start.min(self.peaks.len());
        let end = range.end.min(self.peaks.len());
        &self.peaks[start..end]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeakRecord> {
        self.peaks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    const LINE: &str = "chr19\t66021\t66172\tpeak_0\t243\t.\t4.89309\t8.12464\t5.67920\t75";

    #[test]
    fn test_parse_line() {
        let peak = PeakRecord::parse_line(LINE, 1).unwrap();
        assert_eq!(peak.chrom, "chr19");
        assert_eq!(peak.start, 66021);
        assert_eq!(peak.end, 66172);
        assert_eq!(peak.name, "peak_0");
        assert_eq!(peak.score, 243);
        assert_eq!(peak.strand, '.');
        assert_eq!(peak.summit_offset, 75);
        assert_eq!(peak.summit_position(), 66096);
    }

    #[test]
    fn test_display_round_trips() {
        let peak = PeakRecord::parse_line(LINE, 1).unwrap();
        let reparsed = PeakRecord::parse_line(&peak.to_string(), 1).unwrap();
        assert_eq!(peak, reparsed);
    }

    #[rstest]
    #[case("chr1\t100\t200")]
    #[case("chr1\tnot_a_number\t200\tp\t0\t.\t1.0\t1.0\t1.0\t50")]
    fn test_malformed_lines_error(#[case] line: &str) {
        assert!(PeakRecord::parse_line(line, 1).is_err());
    }

    #[test]
    fn test_read_skips_malformed_and_comments() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("peaks.narrowPeak");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file, "{}", LINE).unwrap();
        writeln!(file, "chr19\tbroken").unwrap();
        writeln!(
            file,
            "chr19\t70021\t70172\tpeak_1\t100\t.\t2.0\t3.0\t1.5\t60"
        )
        .unwrap();

        let set = PeakSet::try_from(path.as_path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.peaks[1].name, "peak_1");
    }

    #[test]
    fn test_sort_by_significance() {
        let mut set = PeakSet::new(vec![
            PeakRecord::parse_line("chr1\t0\t10\tb\t0\t.\t1.0\t2.0\t9.0\t5", 1).unwrap(),
            PeakRecord::parse_line("chr1\t0\t10\ta\t0\t.\t1.0\t2.0\t3.0\t5", 2).unwrap(),
            PeakRecord::parse_line("chr1\t0\t10\tc\t0\t.\t0.5\t2.0\t3.0\t5", 3).unwrap(),
        ]);
        set.sort_by_significance();
        let names: Vec<&str> = set.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_rank_range_is_clamped() {
        let set = PeakSet::new(vec![
            PeakRecord::parse_line(LINE, 1).unwrap(),
        ]);
        assert_eq!(set.rank_range(0..500).len(), 1);
        assert_eq!(set.rank_range(500..1000).len(), 0);
    }
}
