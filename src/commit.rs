use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a parsed `git log` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    /// Author line as printed by git, e.g. `Name <email>`
    pub author: String,
    /// Author date, expressed as wall-clock time in the zone it was parsed for
    pub date: NaiveDateTime,
    pub title: String,
    /// De-indented message body; the first line is always `title`
    pub message: String,
    /// Numeric id taken from a revision marker line, e.g. `git-svn-id: ...@1234 ...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Every `Keyword: value` header line seen for this commit, verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl CommitRecord {
    pub fn short_id(&self) -> &str {
        &self.id[..7.min(self.id.len())]
    }

    pub fn author_name(&self) -> &str {
        Self::split_author(&self.author).0
    }

    pub fn author_email(&self) -> Option<&str> {
        Self::split_author(&self.author).1
    }

    /// `<short id> <date> <title>`
    pub fn summary_line(&self) -> String {
        format!(
            "{} {} {}",
            self.short_id(),
            self.date.format("%Y-%m-%d %H:%M:%S"),
            self.title
        )
    }

    fn split_author(author: &str) -> (&str, Option<&str>) {
        // Parse "Name <email>" format
        if let (Some(email_start), Some(email_end)) = (author.rfind('<'), author.rfind('>')) {
            if email_start < email_end {
                let name = author[..email_start].trim();
                let email = &author[email_start + 1..email_end];
                return (name, Some(email));
            }
        }
        (author.trim(), None)
    }
}

/// One `summary_line` per record, with `r<revision>` appended when known
pub fn render_log(records: &[CommitRecord]) -> String {
    records
        .iter()
        .map(|record| match &record.revision {
            Some(revision) => format!("{} (r{})", record.summary_line(), revision),
            None => record.summary_line(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
