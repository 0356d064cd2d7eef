#![allow(dead_code)]

use gitwrap::{CommandRunner, GitwrapError, Result};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// One recorded `CommandRunner::run` call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Returns canned output and remembers every invocation
#[derive(Default)]
pub struct MockRunner {
    output: String,
    failure: Option<String>,
    calls: RefCell<Vec<Call>>,
}

impl MockRunner {
    pub fn returning(output: &str) -> Self {
        Self {
            output: output.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            failure: Some(stderr.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn last_args(&self) -> Vec<String> {
        self.calls
            .borrow()
            .last()
            .map(|call| call.args.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, args: &[&str], cwd: &Path, _env: &[(String, String)]) -> Result<String> {
        self.calls.borrow_mut().push(Call {
            args: args.iter().map(|s| s.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        });

        match &self.failure {
            Some(stderr) => Err(GitwrapError::GitCommandFailed {
                command: format!("git {}", args.join(" ")),
                output: stderr.clone(),
            }),
            None => Ok(self.output.clone()),
        }
    }
}

pub struct TestRepo {
    temp_dir: TempDir,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    /// An initialised repository with one committed file
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.write("sample_file.txt", "Initial content");
        repo.git(&["add", "."]);
        repo.commit_at("Add sample_file.txt", "2011-07-19T00:11:52+02:00");
        repo
    }

    /// An initialised repository without commits
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let repo = Self { temp_dir };

        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// A committed file plus two untracked ones
    pub fn with_untracked_files() -> Self {
        let repo = Self::new();
        repo.write("not_committed_file.txt", "one");
        repo.write("second_not_committed_file.txt", "two");
        repo
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).unwrap();
    }

    /// Commits everything staged with fixed author and committer dates
    pub fn commit_at(&self, message: &str, date: &str) {
        let status = Command::new("git")
            .args(["commit", "-q", "-m", message])
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date)
            .current_dir(self.path())
            .status()
            .unwrap();
        assert!(status.success(), "git commit failed");
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
