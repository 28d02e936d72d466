use thiserror::Error;

use crate::domain::process::Pid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse simulation config JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write event CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed process description on line {line}: {reason}")]
    ProcessParseError { line: usize, reason: String },

    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Raised when a memory policy asks for more frames than are free. This is a defect in the
    /// policy or the configuration and aborts the run.
    #[error("Process {pid} requested {requested} pages but only {available} of {total_pages} are free")]
    AllocationError { pid: Pid, requested: usize, available: usize, total_pages: usize },

    #[error("Process {pid} requested {requested} pages but is only missing {missing}")]
    OverAllocation { pid: Pid, requested: usize, missing: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unknown scheduling algorithm: '{0}'")]
    UnknownSchedulerType(String),

    #[error("Unknown memory allocation policy: '{0}'")]
    UnknownMemoryPolicy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
