use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use anyhow::Result;
use log::warn;

use crate::utils::get_dynamic_reader;

/// Chromosome name to length, from a two-column chrom.sizes file.
pub type ChromSizes = HashMap<String, u64>;

pub fn parse_chrom_sizes<T: AsRef<Path>>(path: T) -> Result<ChromSizes> {
    let reader = get_dynamic_reader(path.as_ref())?;

    let mut chrom_sizes = ChromSizes::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let chrom = fields.next();
        let size = fields.next().and_then(|s| s.parse::<u64>().ok());
        match (chrom, size) {
            (Some(chrom), Some(size)) => {
                chrom_sizes.insert(chrom.to_string(), size);
            }
            _ => warn!(
                "skipping malformed chrom sizes line {} in {:?}: {}",
                index + 1,
                path.as_ref(),
                line
            ),
        }
    }

    Ok(chrom_sizes)
}
