use std::fmt;

use crate::{JokeId, JokeStatus, Rating};

/// Transport or schema failure of a refresh, as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Network { message: String },
    Decode { message: String },
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Network { message } => write!(f, "could not reach the joke service: {message}"),
            FetchFailure::Decode { message } => write!(f, "the joke service sent an unexpected reply: {message}"),
        }
    }
}

/// Outcome of the most recent user intent worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Refreshed { count: usize },
    RefreshFailed(FetchFailure),
    RefreshCancelled,
    NotFound(JokeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionViewModel {
    pub jokes: Vec<JokeRowView>,
    pub favorites: Vec<JokeRowView>,
    pub loading: bool,
    pub selected: Option<JokeDetailView>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeRowView {
    pub id: JokeId,
    pub category: String,
    pub headline: String,
    pub favorite: bool,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeDetailView {
    pub id: JokeId,
    pub category: String,
    pub lines: Vec<String>,
    pub flags: Vec<&'static str>,
    pub safe: bool,
    pub lang: String,
    pub favorite: bool,
    pub rating: Rating,
    pub status: JokeStatus,
}
