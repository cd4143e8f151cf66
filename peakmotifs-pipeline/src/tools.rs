use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use log::info;

use crate::consts::METHYL_ALPHABET_FILENAME;
use crate::errors::PipelineError;

/// MEME custom alphabet describing DNA with methylated C/G codes, written
/// next to the MEME output directory when methylation analysis is active.
const METHYL_ALPHABET: &str = include_str!("methyl_alphabet.txt");

pub const DEFAULT_MEME_OPTIONS: &str = "-dna -mod zoops -nmotifs 5 -minw 6 -maxw 30 -revcomp";

///
/// Shell-command execution seam. The default runner executes for real;
/// tests substitute a recorder.
///
pub trait CmdRunner {
    fn run(&self, cmd: &str) -> Result<()>;
}

pub struct DefaultCmdRunner;

impl CmdRunner for DefaultCmdRunner {
    fn run(&self, cmd: &str) -> Result<()> {
        info!("executing command: {}", cmd);
        let status = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .status()
            .with_context(|| format!("failed to spawn: {}", cmd))?;
        if !status.success() {
            return Err(PipelineError::CommandFailed {
                command: cmd.to_string(),
                code: status.code().unwrap_or(-1),
            }
            .into());
        }
        Ok(())
    }
}

///
/// Run MEME motif discovery on a FASTA file.
///
/// With `use_methyl_alphabet`, the bundled custom alphabet is written
/// beside the output directory and passed along, so MEME treats M/W as
/// first-class complementary symbols.
///
pub fn meme(
    runner: &dyn CmdRunner,
    fasta_in: &Path,
    output_dir: &Path,
    use_methyl_alphabet: bool,
    meme_options: &str,
) -> Result<()> {
    if let Some(parent) = output_dir.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut alphabet_option = String::new();
    if use_methyl_alphabet {
        let alphabet_file = output_dir
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(METHYL_ALPHABET_FILENAME);
        std::fs::write(&alphabet_file, METHYL_ALPHABET)
            .with_context(|| format!("failed to write {:?}", alphabet_file))?;
        alphabet_option = format!("-alph {} ", alphabet_file.display());
    }

    runner.run(&format!(
        "meme -nostatus -oc {} {} {}{}",
        output_dir.display(),
        meme_options,
        alphabet_option,
        fasta_in.display()
    ))
}

/// Run FIMO with the motifs of a MEME text output against a FASTA file.
pub fn fimo(runner: &dyn CmdRunner, meme_txt: &Path, fasta_in: &Path, output_dir: &Path) -> Result<()> {
    if let Some(parent) = output_dir.parent() {
        std::fs::create_dir_all(parent)?;
    }
    runner.run(&format!(
        "fimo -oc {} {} {}",
        output_dir.display(),
        meme_txt.display(),
        fasta_in.display()
    ))
}

/// Run fasta-center, optionally writing the trimmed-off flanks.
pub fn fasta_center(
    runner: &dyn CmdRunner,
    fasta_in: &Path,
    length: usize,
    flank: Option<&Path>,
    output: &Path,
) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let flank_option = match flank {
        Some(flank) => format!("-flank {} ", flank.display()),
        None => String::new(),
    };
    runner.run(&format!(
        "fasta-center -len {} {}< {} > {}",
        length,
        flank_option,
        fasta_in.display(),
        output.display()
    ))
}
