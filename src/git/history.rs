use crate::commit::CommitRecord;
use crate::error::Result;
use crate::git::commands::CommandRunner;
use crate::git::parser::LogParser;
use chrono::NaiveDateTime;
use std::path::Path;

/// Which part of the history to ask `git log` for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Maximum number of commits to list
    pub limit: Option<usize>,
    /// Commits reachable from `.1` but not from `.0`
    pub range: Option<(String, String)>,
    /// Only commits more recent than this (interpreted by git in local time)
    pub since: Option<NaiveDateTime>,
}

impl LogQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn latest(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Default::default()
        }
    }

    pub fn between(from: &str, to: &str) -> Self {
        Self {
            range: Some((from.to_string(), to.to_string())),
            ..Default::default()
        }
    }

    pub fn after(date: NaiveDateTime) -> Self {
        Self {
            since: Some(date),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn with_range(mut self, from: &str, to: &str) -> Self {
        self.range = Some((from.to_string(), to.to_string()));
        self
    }

    pub fn with_since(mut self, date: NaiveDateTime) -> Self {
        self.since = Some(date);
        self
    }

    /// Arguments for `git log`, after any global options such as `--git-dir`
    pub fn to_args(&self) -> Vec<String> {
        // Pin the layout the parser expects regardless of user config
        let mut args: Vec<String> = [
            "log",
            "--format=medium",
            "--date=default",
            "--no-decorate",
            "--no-color",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if let Some(n) = self.limit {
            args.push(format!("--max-count={}", n));
        }

        if let Some(since) = self.since {
            args.push(format!("--since={}", since.format("%Y-%m-%d %H:%M:%S")));
        }

        if let Some((from, to)) = &self.range {
            // A reference starting with `-` must not be read as an option
            args.push("--end-of-options".to_string());
            args.push(format!("{}..{}", from, to));
        }

        args
    }
}

/// Runs `git log` for `query` and parses its output.
///
/// `global_args` go in front of the subcommand (e.g. `--git-dir=...`).
/// A failing git invocation is returned as an error, never as an empty history.
pub fn fetch_log<R: CommandRunner>(
    runner: &R,
    repo_root: &Path,
    global_args: &[String],
    env: &[(String, String)],
    parser: &LogParser,
    query: &LogQuery,
) -> Result<Vec<CommitRecord>> {
    let query_args = query.to_args();
    let args: Vec<&str> = global_args
        .iter()
        .chain(query_args.iter())
        .map(String::as_str)
        .collect();

    let output = runner.run(&args, repo_root, env)?;
    let records = parser.parse(&output)?;
    log::debug!("Parsed {} commits from git log", records.len());
    Ok(records)
}
