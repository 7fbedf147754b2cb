//! Error types shared by the Roster crates.

use thiserror::Error;

/// The message shown when a submitted username is empty after trimming.
pub const INVALID_USERNAME_MESSAGE: &str = "please enter a valid username";

/// A server payload that could not be turned into a [`Person`](crate::Person).
#[derive(Debug, Error)]
pub enum PersonError {
    /// A required field was absent or `null`.
    #[error("person is missing required field '{0}'")]
    MissingField(&'static str),
    /// A required field was present but empty.
    #[error("person field '{0}' is empty")]
    EmptyField(&'static str),
    /// The list endpoint returned something other than an array.
    #[error("expected a JSON array of people, found {0}")]
    NotAList(&'static str),
    /// One entry of a list response was invalid.
    #[error("person at index {index}: {source}")]
    Entry {
        /// Position of the entry in the response array
        index: usize,
        /// What was wrong with it
        #[source]
        source: Box<PersonError>,
    },
    /// The payload was not valid JSON, or had the wrong shape.
    #[error("invalid person JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PersonError {
    pub(crate) fn at(index: usize, source: Self) -> Self {
        Self::Entry {
            index,
            source: Box::new(source),
        }
    }
}

/// Client-side input validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The username was empty or whitespace only.
    #[error("please enter a valid username")]
    EmptyUsername,
}

impl ValidationError {
    /// The user-facing message for this failure.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyUsername => INVALID_USERNAME_MESSAGE,
        }
    }
}
