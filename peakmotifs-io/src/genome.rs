use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use noodles::core::{Position, Region};
use noodles::fasta;

///
/// Random-access reads from a reference genome, keyed by chromosome and
/// 0-based start position. The trait seam lets the sampler and the
/// sequence-extraction stage run against an in-memory genome in tests.
///
pub trait GenomeAccessor {
    fn load_fragment(&mut self, chrom: &str, start: u64, length: u64) -> Result<String>;
}

///
/// Genome accessor backed by an indexed FASTA file.
///
/// The `.fai` index is read from disk when present and built on demand
/// otherwise. Each pipeline stage opens one accessor and reuses it for
/// every read, so the per-chromosome seek state is paid for once.
///
pub struct IndexedFastaGenome {
    reader: fasta::io::indexed_reader::IndexedReader<BufReader<File>>,
}

impl IndexedFastaGenome {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut fai_path = path.as_os_str().to_os_string();
        fai_path.push(".fai");
        let index = if Path::new(&fai_path).exists() {
            fasta::fai::io::Reader::new(BufReader::new(
                File::open(&fai_path)
                    .with_context(|| format!("Failed to open FASTA index: {:?}", fai_path))?,
            ))
            .read_index()
            .with_context(|| format!("Failed to read FASTA index: {:?}", fai_path))?
        } else {
            info!("no .fai found next to {:?}, indexing", path);
            fasta::fs::index(path)
                .with_context(|| format!("Failed to index FASTA: {:?}", path))?
        };

        let handle = BufReader::new(
            File::open(path).with_context(|| format!("Failed to open FASTA: {:?}", path))?,
        );
        let reader = fasta::io::indexed_reader::Builder::default()
            .set_index(index)
            .build_from_reader(handle)
            .with_context(|| format!("Failed to open FASTA: {:?}", path))?;

        Ok(IndexedFastaGenome { reader })
    }
}

impl GenomeAccessor for IndexedFastaGenome {
    fn load_fragment(&mut self, chrom: &str, start: u64, length: u64) -> Result<String> {
        if length == 0 {
            return Ok(String::new());
        }

        let begin = Position::try_from(start as usize + 1)?;
        let end = Position::try_from((start + length) as usize)?;
        let region = Region::new(chrom, begin..=end);

        let record = self
            .reader
            .query(&region)
            .with_context(|| format!("Failed to read {}:{}-{}", chrom, start, start + length))?;

        let bases = record.sequence().as_ref().to_vec();
        if bases.len() < length as usize {
            bail!(
                "short read at {}:{}-{}: got {} bases",
                chrom,
                start,
                start + length,
                bases.len()
            );
        }

        Ok(String::from_utf8(bases)?)
    }
}

///
/// In-memory genome for tests and tiny assemblies.
///
#[derive(Clone, Debug, Default)]
pub struct InMemoryGenome {
    chroms: HashMap<String, String>,
}

impl InMemoryGenome {
    pub fn new(chroms: HashMap<String, String>) -> Self {
        InMemoryGenome { chroms }
    }

    pub fn chrom_sizes(&self) -> HashMap<String, u64> {
        self.chroms
            .iter()
            .map(|(name, seq)| (name.clone(), seq.len() as u64))
            .collect()
    }
}

impl GenomeAccessor for InMemoryGenome {
    fn load_fragment(&mut self, chrom: &str, start: u64, length: u64) -> Result<String> {
        let Some(sequence) = self.chroms.get(chrom) else {
            bail!("unknown chromosome: {}", chrom);
        };
        let start = start as usize;
        let end = start + length as usize;
        if end > sequence.len() {
            bail!(
                "read past end of {}: {}..{} (length {})",
                chrom,
                start,
                end,
                sequence.len()
            );
        }
        Ok(sequence[start..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_in_memory_genome_reads() {
        let mut genome = InMemoryGenome::new(HashMap::from([(
            "chr1".to_string(),
            "ACGTACGTAC".to_string(),
        )]));
        assert_eq!(genome.load_fragment("chr1", 0, 4).unwrap(), "ACGT");
        assert_eq!(genome.load_fragment("chr1", 6, 4).unwrap(), "GTAC");
        assert!(genome.load_fragment("chr1", 8, 4).is_err());
        assert!(genome.load_fragment("chr2", 0, 4).is_err());
    }

    #[test]
    fn test_indexed_fasta_round_trip() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("mini.fa");
        std::fs::write(&path, ">chr1\nACGTACGTAC\nGGGGCCCCAA\n>chr2\nTTTTAAAA\n").unwrap();

        let mut genome = IndexedFastaGenome::open(&path).unwrap();
        assert_eq!(genome.load_fragment("chr1", 0, 4).unwrap(), "ACGT");
        // spans the line break in the FASTA
        assert_eq!(genome.load_fragment("chr1", 8, 6).unwrap(), "ACGGGG");
        assert_eq!(genome.load_fragment("chr2", 4, 4).unwrap(), "AAAA");
        assert!(genome.load_fragment("chr3", 0, 4).is_err());
    }
}
