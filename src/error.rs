use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitwrapError {
    #[error("Not a git repository: {path}")]
    NotGitRepository { path: PathBuf },

    /// The external program could not be spawned or exited with a non-zero status
    #[error("Git command failed: {command}\n{output}")]
    GitCommandFailed { command: String, output: String },

    #[error("Malformed date: {value:?}")]
    MalformedDate { value: String },

    #[error("Failed to parse git output: {reason}")]
    ParseError { reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GitwrapError>;
