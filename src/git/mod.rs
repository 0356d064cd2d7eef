pub mod commands;
pub mod date;
pub mod files;
pub mod history;
pub mod parser;

use crate::error::{GitwrapError, Result};
use commands::CommandRunner;
use std::path::{Path, PathBuf};

/// Discovers the git repository root from a given path
pub fn discover_repository<R: CommandRunner>(runner: &R, start_path: &Path) -> Result<PathBuf> {
    let output = runner
        .run(&["rev-parse", "--show-toplevel"], start_path, &[])
        .map_err(|e| match e {
            GitwrapError::GitCommandFailed { ref output, .. }
                if output.contains("not a git repository") =>
            {
                GitwrapError::NotGitRepository {
                    path: start_path.to_path_buf(),
                }
            }
            other => other,
        })?;

    Ok(PathBuf::from(output.trim()))
}
