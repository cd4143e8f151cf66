use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use peakmotifs_core::PeakSet;

pub trait PeakWrite {
    ///
    /// Write peaks to disk as a narrowPeak file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    ///
    /// Write peaks to disk as a gzipped narrowPeak file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

impl PeakWrite for PeakSet {
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        for peak in &self.peaks {
            writeln!(writer, "{}", peak)?;
        }
        writer.flush()
    }

    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
        for peak in &self.peaks {
            writeln!(encoder, "{}", peak)?;
        }
        encoder.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const LINES: &str = "chr19\t66021\t66172\tpeak_0\t243\t.\t4.89\t8.12\t5.67\t75\n\
                         chr19\t70021\t70172\tpeak_1\t100\t.\t2\t3\t1.5\t60\n";

    #[test]
    fn test_write_and_reread() {
        let tempdir = tempfile::tempdir().unwrap();
        let src = tempdir.path().join("in.narrowPeak");
        std::fs::write(&src, LINES).unwrap();
        let set = PeakSet::try_from(src.as_path()).unwrap();

        let plain = tempdir.path().join("out.narrowPeak");
        set.write_bed(&plain).unwrap();
        let reread = PeakSet::try_from(plain.as_path()).unwrap();
        assert_eq!(reread.peaks, set.peaks);

        let gz = tempdir.path().join("out.narrowPeak.gz");
        set.write_bed_gz(&gz).unwrap();
        let reread = PeakSet::try_from(gz.as_path()).unwrap();
        assert_eq!(reread.peaks, set.peaks);
    }
}
