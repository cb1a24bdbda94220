use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum KiraError {
    #[error("invalid genome accession: {0}")]
    InvalidGenomeAccession(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read genome list at {path}: {message}")]
    InputRead { path: PathBuf, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("NCBI request failed: {0}")]
    NcbiHttp(String),

    #[error("NCBI returned status {status}: {message}")]
    NcbiStatus { status: u16, message: String },

    #[error("failed to decode NCBI response: {0}")]
    NcbiParse(String),

    #[error("no matching sequences for {0}")]
    EmptyResult(String),

    #[error("no rows to write")]
    NothingToWrite,

    #[error("all {0} genomes failed")]
    BatchFailed(usize),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("failed to write CSV: {0}")]
    CsvWrite(String),
}

impl KiraError {
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            KiraError::NcbiHttp(_) | KiraError::NcbiStatus { .. } | KiraError::NcbiParse(_)
        )
    }

    /// Process exit status: 2 for bad input or config, 3 for NCBI failures,
    /// 4 when there was nothing to write, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            KiraError::InvalidGenomeAccession(_)
            | KiraError::InvalidInput(_)
            | KiraError::InputRead { .. }
            | KiraError::ConfigRead(_)
            | KiraError::ConfigParse(_) => 2,
            KiraError::NcbiHttp(_)
            | KiraError::NcbiStatus { .. }
            | KiraError::NcbiParse(_)
            | KiraError::BatchFailed(_) => 3,
            KiraError::EmptyResult(_) | KiraError::NothingToWrite => 4,
            KiraError::Filesystem(_) | KiraError::CsvWrite(_) => 1,
        }
    }
}
