//! core::types
//!
//! Strong types for commit history records.
//!
//! # Types
//!
//! - [`CommitHash`] - Commit identifier
//! - [`BranchName`] - Validated branch name
//! - [`Commit`] - Immutable commit record read by the layout engine
//!
//! # Validation
//!
//! Records are validated once, when they cross the data-source boundary
//! (deserialization or explicit construction). Everything downstream of
//! this module can rely on well-formed values.
//!
//! # Examples
//!
//! ```
//! use commit_lanes::core::types::{BranchName, Commit, CommitHash};
//!
//! let main = BranchName::new("main").unwrap();
//! let root = Commit::new(CommitHash::new("a1").unwrap(), "prep station", main.clone());
//! let next = Commit::new(CommitHash::new("b2").unwrap(), "add tomato", main)
//!     .with_parents([root.hash.clone()]);
//!
//! assert!(root.is_root());
//! assert!(!next.is_merge());
//! assert!(BranchName::new("bad..name").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid commit hash: {0}")]
    InvalidCommitHash(String),
}

/// A commit identifier.
///
/// Hashes are opaque strings handed out by whatever produced the history.
/// They must be non-empty and may not contain whitespace or control
/// characters, but no particular length or alphabet is assumed.
///
/// # Example
///
/// ```
/// use commit_lanes::core::types::CommitHash;
///
/// let hash = CommitHash::new("3f9c2e1").unwrap();
/// assert_eq!(hash.as_str(), "3f9c2e1");
/// assert_eq!(hash.short(4), "3f9c");
///
/// assert!(CommitHash::new("").is_err());
/// assert!(CommitHash::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitHash(String);

impl CommitHash {
    /// Create a new validated commit hash.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCommitHash` if the hash is empty or
    /// contains whitespace/control characters.
    pub fn new(hash: impl Into<String>) -> Result<Self, TypeError> {
        let hash = hash.into();
        if hash.is_empty() {
            return Err(TypeError::InvalidCommitHash(
                "commit hash cannot be empty".into(),
            ));
        }
        if hash
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(TypeError::InvalidCommitHash(format!(
                "commit hash '{}' cannot contain whitespace or control characters",
                hash.escape_debug()
            )));
        }
        Ok(Self(hash))
    }

    /// Get the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get an abbreviated form of at most `len` characters.
    pub fn short(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl TryFrom<String> for CommitHash {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CommitHash> for String {
    fn from(hash: CommitHash) -> Self {
        hash.0
    }
}

impl AsRef<str> for CommitHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated branch name.
///
/// Branch names follow Git's refname rules (see `git check-ref-format`),
/// since histories are produced by a git-like backend:
/// - Cannot be empty or exactly `@`
/// - Cannot start with `.` or `-`
/// - Cannot end with `.lock` or `/`
/// - Cannot contain `..`, `@{`, `//`, or ASCII control characters
/// - Cannot contain spaces, `~`, `^`, `:`, `\`, `?`, `*`, `[`
///
/// # Example
///
/// ```
/// use commit_lanes::core::types::BranchName;
///
/// let name = BranchName::new("feature/sauce").unwrap();
/// assert_eq!(name.as_str(), "feature/sauce");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new(".hidden").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name).map_err(|reason| {
            TypeError::InvalidBranchName(format!("'{}': {}", name.escape_debug(), reason))
        })?;
        Ok(Self(name))
    }

    /// Check a name against the refname rules, returning the violated rule.
    fn validate(name: &str) -> Result<(), &'static str> {
        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];

        if name.is_empty() {
            return Err("branch name cannot be empty");
        }
        if name == "@" {
            return Err("branch name cannot be '@'");
        }
        if name.starts_with('.') || name.starts_with('-') {
            return Err("branch name cannot start with '.' or '-'");
        }
        if name.ends_with('/') {
            return Err("branch name cannot end with '/'");
        }
        if ["..", "@{", "//"].iter().any(|seq| name.contains(seq)) {
            return Err("branch name cannot contain '..', '@{' or '//'");
        }
        if name
            .chars()
            .any(|c| c.is_ascii_control() || INVALID_CHARS.contains(&c))
        {
            return Err("branch name contains a forbidden character");
        }
        if name
            .split('/')
            .any(|component| component.starts_with('.') || component.ends_with(".lock"))
        {
            return Err("path component cannot start with '.' or end with '.lock'");
        }
        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit record.
///
/// The wire names match the history backend (`commit_hash`,
/// `parent_commits`). The `contents` payload is carried through untouched;
/// the layout engine never looks at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Unique identifier
    #[serde(rename = "commit_hash")]
    pub hash: CommitHash,

    /// Human-readable commit message
    #[serde(default)]
    pub message: String,

    /// Owning branch
    pub branch: BranchName,

    /// Parent hashes, in order (empty for a root commit)
    #[serde(rename = "parent_commits", default)]
    pub parents: Vec<CommitHash>,

    /// Opaque snapshot payload
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub contents: serde_json::Value,
}

impl Commit {
    /// Create a root commit with an empty payload.
    pub fn new(hash: CommitHash, message: impl Into<String>, branch: BranchName) -> Self {
        Self {
            hash,
            message: message.into(),
            branch,
            parents: Vec::new(),
            contents: serde_json::Value::Null,
        }
    }

    /// Replace the parent list.
    pub fn with_parents(mut self, parents: impl IntoIterator<Item = CommitHash>) -> Self {
        self.parents = parents.into_iter().collect();
        self
    }

    /// Replace the content payload.
    pub fn with_contents(mut self, contents: serde_json::Value) -> Self {
        self.contents = contents;
        self
    }

    /// True if the commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// True if the commit has two or more parents.
    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }
}
