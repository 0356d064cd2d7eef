use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gitwrap",
    version,
    about = "List paths, staging status and commit history of a git repository",
    long_about = None
)]
pub struct Args {
    /// Repository work tree (auto-discovered if not specified)
    #[arg(short = 'C', long = "repo", value_name = "DIR")]
    pub repo_path: Option<PathBuf>,

    /// Git executable to run
    #[arg(long = "git", env = "GITWRAP_GIT", value_name = "PATH")]
    pub git_executable: Option<PathBuf>,

    /// Git directory, relative to the work tree
    #[arg(long = "git-dir", value_name = "DIR")]
    pub git_dir: Option<PathBuf>,

    /// Prefix of the message line holding a foreign revision number
    #[arg(long = "revision-marker", value_name = "PREFIX")]
    pub revision_marker: Option<String>,

    /// Configuration file (defaults to $GITWRAP_CONFIG or the user config dir)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show commit history
    Log {
        /// Only commits after this date (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        since: Option<String>,

        /// Only commits in FROM..TO
        #[arg(long, value_name = "FROM..TO")]
        range: Option<String>,

        /// Maximum number of commits
        #[arg(short = 'n', long = "max-count")]
        limit: Option<usize>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// List tracked paths
    Paths,
    /// Show staging status of changed paths
    Status,
    /// Stage paths
    Add {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Stage every changed or untracked path
    AddAll,
    /// Record staged changes
    Commit {
        #[arg(short = 'm', long = "message")]
        message: String,
    },
    /// Create a new repository
    Init {
        path: PathBuf,

        /// Keep the git directory outside the work tree
        #[arg(long = "separate-git-dir", value_name = "DIR")]
        separate_git_dir: Option<PathBuf>,
    },
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if let Command::Log {
            since,
            range,
            limit,
            ..
        } = &self.command
        {
            if *limit == Some(0) {
                return Err("Max count must be at least 1".to_string());
            }
            if let Some(range) = range {
                parse_range(range)?;
            }
            if let Some(since) = since {
                parse_since(since)?;
            }
        }

        Ok(())
    }
}

/// Splits `FROM..TO` into its two references
pub fn parse_range(range: &str) -> Result<(String, String), String> {
    match range.split_once("..") {
        Some((from, to)) if !from.is_empty() && !to.is_empty() && !to.starts_with('.') => {
            if from.starts_with('-') || to.starts_with('-') {
                return Err(format!("References may not start with '-', got {:?}", range));
            }
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("Range must look like FROM..TO, got {:?}", range)),
    }
}

/// Accepts a date or a date with time
pub fn parse_since(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(date_time);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("Invalid date {:?}, expected YYYY-MM-DD[ HH:MM:SS]", value))
}
