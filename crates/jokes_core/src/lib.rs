//! Jokes core: domain model, pure collection state machine and view-model helpers.
mod effect;
mod error;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{CoreError, JokeShapeError};
pub use model::{Flags, Joke, JokeBody, JokeId, JokeResponse, Rating, DEFAULT_AMOUNT};
pub use msg::Msg;
pub use state::{
    CollectionState, FavoriteToggle, JokeStatus, RefreshApplied, RefreshSeq,
};
pub use update::update;
pub use view_model::{
    CollectionViewModel, FetchFailure, JokeDetailView, JokeRowView, Notice,
};
