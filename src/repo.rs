use crate::commit::CommitRecord;
use crate::error::Result;
use crate::git::commands::{CommandRunner, GitCli};
use crate::git::files::{parse_path_list, parse_staging, StagingCode};
use crate::git::history::{fetch_log, LogQuery};
use crate::git::parser::LogParser;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_GIT_DIR: &str = ".git";

/// A work tree plus its git directory, driven through a [`CommandRunner`]
#[derive(Debug, Clone)]
pub struct GitRepo<R: CommandRunner = GitCli> {
    path: PathBuf,
    git_dir: PathBuf,
    env: Vec<(String, String)>,
    runner: R,
    parser: LogParser,
}

impl GitRepo<GitCli> {
    /// Opens the work tree at `path` using the `git` found on PATH
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_runner(path, DEFAULT_GIT_DIR, GitCli::default())
    }
}

impl<R: CommandRunner> GitRepo<R> {
    pub fn with_runner(path: impl Into<PathBuf>, git_dir: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            path: path.into(),
            git_dir: git_dir.into(),
            env: Vec::new(),
            runner,
            parser: LogParser::new(),
        }
    }

    /// Creates a repository at `path` with `git init`.
    ///
    /// A `git_dir` other than `.git` is created outside the work tree via
    /// `--separate-git-dir`. A relative one is resolved against the current
    /// directory and stored absolute.
    pub fn init(path: impl Into<PathBuf>, git_dir: impl Into<PathBuf>, runner: R) -> Result<Self> {
        let path = path.into();
        let mut git_dir = git_dir.into();
        if git_dir != Path::new(DEFAULT_GIT_DIR) {
            git_dir = std::path::absolute(&git_dir)?;
        }

        let path_arg = path.to_string_lossy().into_owned();
        let mut args = vec!["init".to_string(), path_arg];
        if git_dir != Path::new(DEFAULT_GIT_DIR) {
            args.push(format!("--separate-git-dir={}", git_dir.display()));
        }

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        runner.run(&args, Path::new("."), &[])?;
        log::info!("Initialized repository at {}", path.display());

        Ok(Self::with_runner(path, git_dir, runner))
    }

    /// Sets an environment variable for every git invocation
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_parser(mut self, parser: LogParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs `git --git-dir=<git_dir> <args>` inside the work tree
    pub fn git(&self, args: &[&str]) -> Result<String> {
        let global = self.global_args();
        let full: Vec<&str> = global
            .iter()
            .map(String::as_str)
            .chain(args.iter().copied())
            .collect();
        self.runner.run(&full, &self.path, &self.env)
    }

    /// Tracked paths, as listed by `git ls-files`
    pub fn paths(&self) -> Result<Vec<String>> {
        let output = self.git(&["ls-files", "-z"])?;
        Ok(parse_path_list(&output))
    }

    /// Paths with pending changes and their porcelain status codes
    pub fn staging(&self) -> Result<BTreeMap<String, StagingCode>> {
        let output = self.git(&["status", "--porcelain", "-z"])?;
        parse_staging(&output)
    }

    pub fn add(&self, path: &str) -> Result<()> {
        self.git(&["add", "--", path])?;
        Ok(())
    }

    /// Stages every path that `staging` reports
    pub fn add_all(&self) -> Result<()> {
        for path in self.staging()?.keys() {
            self.add(path)?;
        }
        Ok(())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    /// Every commit reachable from HEAD, newest first
    pub fn log(&self) -> Result<Vec<CommitRecord>> {
        self.log_with(&LogQuery::all())
    }

    /// Commits reachable from `to` but not from `from`
    pub fn log_between(&self, from: &str, to: &str) -> Result<Vec<CommitRecord>> {
        self.log_with(&LogQuery::between(from, to))
    }

    /// Commits more recent than `date` (local time)
    pub fn log_since(&self, date: NaiveDateTime) -> Result<Vec<CommitRecord>> {
        self.log_with(&LogQuery::after(date))
    }

    pub fn log_with(&self, query: &LogQuery) -> Result<Vec<CommitRecord>> {
        fetch_log(
            &self.runner,
            &self.path,
            &self.global_args(),
            &self.env,
            &self.parser,
            query,
        )
    }

    fn global_args(&self) -> Vec<String> {
        vec![format!("--git-dir={}", self.git_dir.display())]
    }
}
