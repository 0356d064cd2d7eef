use anyhow::{anyhow, Result};
use clap::Parser;
use gitwrap::cli::{self, Command};
use gitwrap::commit::render_log;
use gitwrap::config::Config;
use gitwrap::git::{self, commands::GitCli};
use gitwrap::{GitRepo, LogParser, LogQuery};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = cli::Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    }

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: cli::Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(git_executable) = args.git_executable {
        config.git_executable = git_executable;
    }
    if let Some(git_dir) = args.git_dir {
        config.git_dir = git_dir;
    }
    if let Some(marker) = args.revision_marker {
        config.revision_marker = marker;
    }

    let runner = GitCli::new(&config.git_executable);
    let repo_path = args.repo_path;

    match args.command {
        Command::Init {
            path,
            separate_git_dir,
        } => {
            let git_dir = separate_git_dir
                .unwrap_or_else(|| PathBuf::from(gitwrap::repo::DEFAULT_GIT_DIR));
            GitRepo::init(path, git_dir, runner)?;
        }
        Command::Log {
            since,
            range,
            limit,
            json,
        } => {
            let query = build_query(since.as_deref(), range.as_deref(), limit)?;
            let records = open_repo(repo_path, runner, &config)?.log_with(&query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if !records.is_empty() {
                println!("{}", render_log(&records));
            }
        }
        Command::Paths => {
            for path in open_repo(repo_path, runner, &config)?.paths()? {
                println!("{}", path);
            }
        }
        Command::Status => {
            for (path, code) in open_repo(repo_path, runner, &config)?.staging()? {
                println!("{}\t{}", code, path);
            }
        }
        Command::Add { paths } => {
            let repo = open_repo(repo_path, runner, &config)?;
            for path in &paths {
                repo.add(path)?;
            }
        }
        Command::AddAll => open_repo(repo_path, runner, &config)?.add_all()?,
        Command::Commit { message } => open_repo(repo_path, runner, &config)?.commit(&message)?,
    }

    Ok(())
}

/// Uses `-C` when given, otherwise discovers the repository from the current directory
fn open_repo(repo_path: Option<PathBuf>, runner: GitCli, config: &Config) -> Result<GitRepo> {
    let repo_root = match repo_path {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir()?;
            git::discover_repository(&runner, &cwd).map_err(|e| {
                eprintln!("Failed to find git repository from: {}", cwd.display());
                e
            })?
        }
    };
    log::debug!("Using git repository at: {}", repo_root.display());

    Ok(GitRepo::with_runner(repo_root, &config.git_dir, runner)
        .with_parser(LogParser::with_revision_marker(&config.revision_marker)))
}

fn build_query(since: Option<&str>, range: Option<&str>, limit: Option<usize>) -> Result<LogQuery> {
    let mut query = LogQuery::all();
    if let Some(since) = since {
        query = query.with_since(cli::parse_since(since).map_err(|e| anyhow!(e))?);
    }
    if let Some(range) = range {
        let (from, to) = cli::parse_range(range).map_err(|e| anyhow!(e))?;
        query = query.with_range(&from, &to);
    }
    if let Some(limit) = limit {
        query = query.with_limit(limit);
    }
    Ok(query)
}
