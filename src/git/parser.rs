//! Parser for `git log --format=medium` output.
//!
//! The listing is a sequence of blocks:
//!
//! ```text
//! commit f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06
//! Author: A. Dev <a@example.com>
//! Date:   Thu Jul 21 09:39:48 2011 +0200
//!
//!     Fix bug in parser
//! ```
//!
//! [`LogParser`] walks it line by line through three states (`SeekingCommit`,
//! `InHeader`, `InBody`) and never looks back.

use crate::commit::CommitRecord;
use crate::error::Result;
use crate::git::date::normalize_date_in;
use chrono::{Local, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Prefix git puts in front of every message line
pub const BODY_INDENT: &str = "    ";

/// Marker written by `git svn` into imported commit messages
pub const DEFAULT_REVISION_MARKER: &str = "git-svn-id";

static COMMIT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^commit ([0-9a-fA-F]{7,64})(?:\s.*)?$").unwrap());

static HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9-]*):\s*(.*)$").unwrap());

static REVISION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(\d+)(?:\s|$)").unwrap());

/// Parses a log listing with the default settings, rendering dates in local time
pub fn parse_log(text: &str) -> Result<Vec<CommitRecord>> {
    LogParser::new().parse(text)
}

/// Converts `git log` text into [`CommitRecord`]s.
///
/// Holds no state between calls; one parser can be shared freely.
#[derive(Debug, Clone)]
pub struct LogParser {
    revision_marker: String,
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser {
    pub fn new() -> Self {
        Self::with_revision_marker(DEFAULT_REVISION_MARKER)
    }

    /// Uses `prefix` (without the colon) to recognise revision marker lines
    pub fn with_revision_marker(prefix: &str) -> Self {
        Self {
            revision_marker: prefix.to_string(),
        }
    }

    pub fn revision_marker(&self) -> &str {
        &self.revision_marker
    }

    /// Parses `text`, rendering commit dates as local wall-clock time
    pub fn parse(&self, text: &str) -> Result<Vec<CommitRecord>> {
        self.parse_in(text, &Local)
    }

    /// Parses `text`, rendering commit dates as wall-clock time in `tz`.
    ///
    /// Records come back in input order. A block without any message line, or
    /// without an `Author`/`Date` header, is skipped. A `Date` header that cannot
    /// be parsed aborts the whole parse with
    /// [`GitwrapError::MalformedDate`](crate::error::GitwrapError::MalformedDate).
    pub fn parse_in<Tz: TimeZone>(&self, text: &str, tz: &Tz) -> Result<Vec<CommitRecord>> {
        let mut records = Vec::new();
        let mut state = State::SeekingCommit;

        for line in text.lines() {
            state = match state {
                State::SeekingCommit => match commit_id(line) {
                    Some(id) => State::InHeader(Pending::new(id)),
                    None => State::SeekingCommit,
                },
                State::InHeader(mut pending) => {
                    if let Some(id) = commit_id(line) {
                        pending.discard();
                        State::InHeader(Pending::new(id))
                    } else if is_blank(line) {
                        State::InHeader(pending)
                    } else if let Some(body_line) = line.strip_prefix(BODY_INDENT) {
                        self.push_body_line(&mut pending, body_line);
                        State::InBody(pending)
                    } else {
                        pending.header(line, tz)?;
                        State::InHeader(pending)
                    }
                }
                State::InBody(mut pending) => {
                    if let Some(id) = commit_id(line) {
                        pending.finish(&mut records);
                        State::InHeader(Pending::new(id))
                    } else if is_blank(line) {
                        pending.push_blank();
                        State::InBody(pending)
                    } else if let Some(body_line) = line.strip_prefix(BODY_INDENT) {
                        self.push_body_line(&mut pending, body_line);
                        State::InBody(pending)
                    } else {
                        // e.g. --stat or --name-status output after the message
                        pending.finish(&mut records);
                        State::SeekingCommit
                    }
                }
            };
        }

        match state {
            State::InBody(pending) => pending.finish(&mut records),
            State::InHeader(pending) => pending.discard(),
            State::SeekingCommit => {}
        }

        Ok(records)
    }

    fn push_body_line(&self, pending: &mut Pending, line: &str) {
        if let Some(revision) = self.marker_revision(line) {
            pending.revision = Some(revision.to_string());
            return;
        }
        pending.body.push(line.to_string());
    }

    fn marker_revision<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line
            .strip_prefix(self.revision_marker.as_str())?
            .strip_prefix(':')?;
        REVISION
            .captures(rest)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

enum State {
    SeekingCommit,
    InHeader(Pending),
    InBody(Pending),
}

/// The record currently being assembled
struct Pending {
    id: String,
    author: Option<String>,
    date: Option<NaiveDateTime>,
    headers: BTreeMap<String, String>,
    body: Vec<String>,
    revision: Option<String>,
}

impl Pending {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            author: None,
            date: None,
            headers: BTreeMap::new(),
            body: Vec::new(),
            revision: None,
        }
    }

    fn header<Tz: TimeZone>(&mut self, line: &str, tz: &Tz) -> Result<()> {
        let Some(caps) = HEADER_LINE.captures(line) else {
            log::debug!("Ignoring unrecognised line in header of {}: {:?}", self.id, line);
            return Ok(());
        };

        let key = &caps[1];
        let value = caps[2].trim_end();

        match key {
            "Author" => self.author = Some(value.to_string()),
            "Date" => self.date = Some(normalize_date_in(value, tz)?),
            _ => {}
        }
        self.headers.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn push_blank(&mut self) {
        // Blank lines ahead of the first message line are spacing, not message
        if !self.body.is_empty() {
            self.body.push(String::new());
        }
    }

    fn discard(self) {
        log::debug!("Dropping commit {} without a message body", self.id);
    }

    fn finish(mut self, records: &mut Vec<CommitRecord>) {
        while self.body.last().is_some_and(|line| line.is_empty()) {
            self.body.pop();
        }

        let Some(title) = self.body.first().cloned() else {
            self.discard();
            return;
        };

        let (Some(author), Some(date)) = (self.author, self.date) else {
            log::warn!("Dropping commit {}: missing Author or Date header", self.id);
            return;
        };

        records.push(CommitRecord {
            id: self.id,
            author,
            date,
            title,
            message: self.body.join("\n"),
            revision: self.revision,
            headers: self.headers,
        });
    }
}

fn commit_id(line: &str) -> Option<&str> {
    COMMIT_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
