use crate::{JokeId, RefreshSeq};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchJokes { seq: RefreshSeq, amount: u32 },
    CancelFetch { seq: RefreshSeq },
    Share { id: JokeId, text: String },
}
