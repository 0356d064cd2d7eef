use crate::error::{GitwrapError, Result};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Clean,     // Tracked, no changes
    Modified,  // Modified in working directory
    Staged,    // Changes staged for commit
    Untracked, // Not tracked by git
    Mixed,     // Both staged and working directory changes
}

/// The two status columns of a `git status --porcelain` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagingCode {
    pub index: char,
    pub worktree: char,
}

impl StagingCode {
    pub fn new(index: char, worktree: char) -> Self {
        Self { index, worktree }
    }

    /// The code as git prints it, without padding: `??`, `M`, `A`, `MM`...
    pub fn code(&self) -> String {
        format!("{}{}", self.index, self.worktree).trim().to_string()
    }

    pub fn status(&self) -> FileStatus {
        match (self.index, self.worktree) {
            (' ', ' ') => FileStatus::Clean,
            ('?', '?') => FileStatus::Untracked,
            (' ', _) => FileStatus::Modified,
            (_, ' ') => FileStatus::Staged,
            _ => FileStatus::Mixed,
        }
    }
}

impl fmt::Display for StagingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// Splits NUL-terminated `git ls-files -z` output into paths
pub fn parse_path_list(output: &str) -> Vec<String> {
    output
        .split('\0')
        .map(|s| s.trim_end_matches('\n'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `git status --porcelain -z` output into a map of path to status code.
///
/// Entries are NUL-terminated and paths are never quoted. A rename or copy
/// entry is followed by its source path; the map is keyed by the new path.
pub fn parse_staging(output: &str) -> Result<BTreeMap<String, StagingCode>> {
    let mut staging = BTreeMap::new();
    let mut entries = output.split('\0').filter(|entry| !entry.is_empty());

    while let Some(entry) = entries.next() {
        let mut chars = entry.chars();
        let (Some(index), Some(worktree), Some(' ')) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(GitwrapError::ParseError {
                reason: format!("Unexpected status entry: {:?}", entry),
            });
        };

        let path = chars.as_str();
        if path.is_empty() {
            return Err(GitwrapError::ParseError {
                reason: format!("Status entry without a path: {:?}", entry),
            });
        }

        if matches!(index, 'R' | 'C') || matches!(worktree, 'R' | 'C') {
            // source path
            entries.next();
        }

        staging.insert(path.to_string(), StagingCode::new(index, worktree));
    }

    Ok(staging)
}
