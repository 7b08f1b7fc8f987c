//! Plain data types shared by the store, the derived views and the CLI.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque idea identifier.
///
/// Freshly generated ids are decimal millisecond timestamps, but ids loaded
/// from storage are taken as-is; nothing downstream depends on the format.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(String);

impl IdeaId {
    /// Create an id from anything that converts to `String`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdeaId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for IdeaId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A submitted startup idea.
///
/// `rating` and `feedback` are assigned once at submission. `votes` only
/// ever moves up by one through `IdeaStore::vote_for_idea`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Unique identifier
    pub id: IdeaId,
    /// Startup name
    pub name: String,
    /// One-line pitch
    pub tagline: String,
    /// Longer description
    pub description: String,
    /// Synthetic AI rating in `[60, 100]`
    pub rating: u8,
    /// Canned feedback sentence
    pub feedback: String,
    /// Number of votes received
    pub votes: u32,
    /// Submission time
    pub created_at: DateTime<Utc>,
}

/// The user-supplied part of an idea.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewIdea {
    /// Startup name
    pub name: String,
    /// One-line pitch
    pub tagline: String,
    /// Longer description
    pub description: String,
}

impl NewIdea {
    /// Creates a submission payload without validating it.
    pub fn new(
        name: impl Into<String>,
        tagline: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tagline: tagline.into(),
            description: description.into(),
        }
    }

    /// Trims every field and rejects the payload if any field ends up empty.
    ///
    /// The store accepts whatever it is given; front ends call this before
    /// submitting.
    ///
    /// # Errors
    /// Returns `Error::MissingField` naming the first empty field, checked in
    /// the order name, tagline, description.
    pub fn validated(self) -> Result<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        let tagline = self.tagline.trim();
        if tagline.is_empty() {
            return Err(Error::MissingField("tagline"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::MissingField("description"));
        }

        Ok(Self::new(name, tagline, description))
    }
}
