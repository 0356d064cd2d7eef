use crate::error::{GitwrapError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs the external version-control program and hands back its stdout.
///
/// Everything that talks to git goes through this trait, so callers can swap
/// the real process for a recorded one in tests.
pub trait CommandRunner {
    /// Runs the program with `args` inside `cwd`, adding `env` to its environment.
    ///
    /// Fails with [`GitwrapError::GitCommandFailed`] when the program cannot be
    /// started or exits with a non-zero status.
    fn run(&self, args: &[&str], cwd: &Path, env: &[(String, String)]) -> Result<String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, args: &[&str], cwd: &Path, env: &[(String, String)]) -> Result<String> {
        (**self).run(args, cwd, env)
    }
}

/// Runs a real `git` executable as a child process
#[derive(Debug, Clone)]
pub struct GitCli {
    executable: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl CommandRunner for GitCli {
    fn run(&self, args: &[&str], cwd: &Path, env: &[(String, String)]) -> Result<String> {
        let command_line = format!("git {}", args.join(" "));
        log::debug!("Running `{}` in {}", command_line, cwd.display());

        let output = Command::new(&self.executable)
            .args(args)
            .current_dir(cwd)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|e| GitwrapError::GitCommandFailed {
                command: command_line.clone(),
                output: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitwrapError::GitCommandFailed {
                command: command_line,
                output: stderr.trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
