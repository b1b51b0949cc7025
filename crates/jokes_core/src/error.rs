use crate::JokeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("joke {0} is neither in the current batch nor in favorites")]
    NotFound(JokeId),
}

/// A joke record whose `type` does not agree with the content fields it carries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JokeShapeError {
    #[error("joke {id}: type \"single\" requires a `joke` text")]
    MissingText { id: JokeId },
    #[error("joke {id}: type \"twopart\" requires a setup or a delivery")]
    MissingParts { id: JokeId },
    #[error("joke {id}: unknown joke type {kind:?}")]
    UnknownType { id: JokeId, kind: String },
}
