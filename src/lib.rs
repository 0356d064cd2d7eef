pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod repo;

pub use commit::CommitRecord;
pub use error::{GitwrapError, Result};
pub use git::commands::{CommandRunner, GitCli};
pub use git::history::LogQuery;
pub use git::parser::{parse_log, LogParser};
pub use repo::GitRepo;
