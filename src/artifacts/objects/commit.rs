//! Git commit object
//!
//! Commits are the nodes of the history graph the walker traverses.
//! They contain:
//! - Parent commit ID(s) (the graph edges)
//! - Author and committer information
//! - Commit message
//! - Optionally, the tree they snapshot and the paths they changed
//!
//! ## Format
//!
//! On disk (after the `commit <size>\0` header):
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use derive_new::new;
use std::collections::BTreeSet;
use std::io::BufRead;

/// Author or committer identity
///
/// Name and email are optional: an empty field in a stored commit is read
/// as absent, so person filters can match on "no name" explicitly.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Person {
    name: Option<String>,
    email: Option<String>,
    timestamp: DateTime<FixedOffset>,
}

impl Person {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format person name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!(
            "{} <{}>",
            self.name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default()
        )
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn parse_timezone(timezone: &str) -> anyhow::Result<FixedOffset> {
        let (sign, digits) = match timezone.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => return Err(anyhow::anyhow!("Invalid timezone {timezone}")),
        };
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(anyhow::anyhow!("Invalid timezone {timezone}"));
        }

        let hours = digits[..2].parse::<i32>()?;
        let minutes = digits[2..].parse::<i32>()?;

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .ok_or_else(|| anyhow::anyhow!("Invalid timezone {timezone}"))
    }
}

impl TryFrom<&str> for Person {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid person format: {value}"));
        }

        let offset = Self::parse_timezone(parts[0])?;
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp {}", parts[1]))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid person format: missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|end| *end > email_start)
            .ok_or_else(|| anyhow::anyhow!("Invalid person format: missing '>'"))?;

        let name = name_email_part[..email_start].trim();
        let email = name_email_part[email_start + 1..email_end].trim();

        let timestamp = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp {timestamp}"))?
            .with_timezone(&offset);

        Ok(Person {
            name: (!name.is_empty()).then(|| name.to_string()),
            email: (!email.is_empty()).then(|| email.to_string()),
            timestamp,
        })
    }
}

/// Immutable commit node
///
/// Produced by a commit graph provider and only ever read by filters and
/// the walker.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    oid: ObjectId,
    /// Parent commit IDs (empty for root commits, multiple for merges)
    parents: Vec<ObjectId>,
    tree_oid: Option<ObjectId>,
    author: Person,
    committer: Person,
    message: String,
    /// Slash-separated paths touched relative to the first parent, when known
    changed_paths: Option<BTreeSet<String>>,
}

impl Commit {
    pub fn new(
        oid: ObjectId,
        parents: Vec<ObjectId>,
        author: Person,
        committer: Person,
        message: String,
    ) -> Self {
        Commit {
            oid,
            parents,
            tree_oid: None,
            author,
            committer,
            message,
            changed_paths: None,
        }
    }

    pub fn with_tree(mut self, tree_oid: ObjectId) -> Self {
        self.tree_oid = Some(tree_oid);
        self
    }

    pub fn with_changed_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Parse the content of a commit object (header already consumed)
    pub fn parse(oid: ObjectId, reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8_lossy(&content);

        let (headers, message) = content
            .split_once("\n\n")
            .unwrap_or((content.as_ref(), ""));

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            // continuation lines belong to multi-line headers such as gpgsig
            if line.starts_with(' ') {
                continue;
            }

            match line.split_once(' ') {
                Some(("tree", value)) => {
                    tree_oid = Some(ObjectId::try_parse(value.to_string())?);
                }
                Some(("parent", value)) => {
                    parents.push(ObjectId::try_parse(value.to_string())?);
                }
                Some(("author", value)) => {
                    author = Some(Person::try_from(value).context("Invalid author line")?);
                }
                Some(("committer", value)) => {
                    committer = Some(Person::try_from(value).context("Invalid committer line")?);
                }
                _ => {}
            }
        }

        let author = author.context("Invalid commit object: missing author line")?;
        let committer = committer.context("Invalid commit object: missing committer line")?;

        let commit = Commit::new(oid, parents, author, committer, message.to_string());
        match tree_oid {
            Some(tree_oid) => Ok(commit.with_tree(tree_oid)),
            None => Err(anyhow::anyhow!("Invalid commit object: missing tree line")),
        }
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn tree_oid(&self) -> Option<&ObjectId> {
        self.tree_oid.as_ref()
    }

    pub fn author(&self) -> &Person {
        &self.author
    }

    pub fn committer(&self) -> &Person {
        &self.committer
    }

    /// Committer timestamp, used for walk ordering
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.committer.timestamp()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    ///
    /// Useful for short-form display (e.g., `git log --oneline`)
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn changed_paths(&self) -> Option<&BTreeSet<String>> {
        self.changed_paths.as_ref()
    }
}
