//! Jokes engine: joke provider client, response decoding, the async collection
//! store and effect execution for message-driven front-ends.
mod client;
mod decode;
mod engine;
mod store;
mod types;

pub use client::{
    ClientSettings, JokeCategory, JokeClient, JokeRequest, ReqwestJokeClient, DEFAULT_BASE_URL,
};
pub use decode::{decode_response, DecodeError};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use store::{JokeCollectionStore, RefreshOutcome};
pub use types::{EngineEvent, FailureKind, FetchError};
