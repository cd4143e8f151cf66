use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("not enough usable peaks: {found} available out of {required} required")]
    NotEnoughPeaks { found: usize, required: usize },

    #[error("command failed with exit code {code}: {command}")]
    CommandFailed { command: String, code: i32 },
}
