use crate::{FetchFailure, Joke, JokeId, Rating, RefreshSeq};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a fresh batch of `amount` jokes.
    RefreshRequested { amount: u32 },
    /// User abandoned the refresh in flight (e.g. the list was dismissed).
    RefreshCancelled,
    /// Engine delivered the batch for refresh `seq`.
    JokesFetched { seq: RefreshSeq, jokes: Vec<Joke> },
    /// Engine could not complete refresh `seq`.
    RefreshFailed { seq: RefreshSeq, failure: FetchFailure },
    /// User opened the detail view of a joke.
    DetailOpened(JokeId),
    /// User left the detail view.
    DetailClosed,
    FavoriteToggled(JokeId),
    Rated { id: JokeId, rating: Rating },
    ShareRequested(JokeId),
}
