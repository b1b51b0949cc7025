use std::sync::{Mutex, MutexGuard, PoisonError};

use jokes_core::{
    CollectionState, CollectionViewModel, CoreError, FavoriteToggle, Joke, JokeId, JokeStatus,
    Rating, RefreshApplied, RefreshSeq,
};
use jokes_logging::{jokes_debug, jokes_info, jokes_warn};

use crate::{FetchError, JokeCategory, JokeClient, JokeRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { count: usize },
    /// A later refresh started, or this one was cancelled; the batch was discarded.
    Superseded,
}

/// Single source of truth for a presentation layer: the current batch, the
/// favorites and the session ratings, refreshed through a [`JokeClient`].
///
/// Read accessors hand out copies, so callers cannot mutate the collections in place.
pub struct JokeCollectionStore<C> {
    client: C,
    category: JokeCategory,
    state: Mutex<CollectionState>,
}

impl<C: JokeClient> JokeCollectionStore<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            category: JokeCategory::Any,
            state: Mutex::new(CollectionState::new()),
        }
    }

    pub fn with_category(mut self, category: JokeCategory) -> Self {
        self.category = category;
        self
    }

    /// Fetch `amount` jokes and replace the current batch with them.
    ///
    /// Only the most recent call applies its result. On failure the previous
    /// batch and the favorites stay as they were. Loading is cleared on every
    /// exit path, including the returned future being dropped.
    pub async fn refresh(&self, amount: u32) -> Result<RefreshOutcome, FetchError> {
        let seq = self.lock().begin_refresh();
        let guard = RefreshGuard {
            state: &self.state,
            seq,
            armed: true,
        };

        let request = JokeRequest::new(self.category, amount);
        let result = self.client.fetch_jokes(&request).await;
        guard.disarm();

        let mut state = self.lock();
        match result {
            Ok(response) => match state.finish_refresh(seq, response.jokes) {
                RefreshApplied::Applied { count } => {
                    jokes_info!("Refresh {} applied {} jokes", seq, count);
                    Ok(RefreshOutcome::Applied { count })
                }
                RefreshApplied::Stale => {
                    jokes_debug!("Refresh {} superseded; discarding its batch", seq);
                    Ok(RefreshOutcome::Superseded)
                }
            },
            Err(err) => {
                state.fail_refresh(seq);
                jokes_warn!("Refresh {} failed: {}", seq, err);
                Err(err)
            }
        }
    }

    /// Abandons the refresh in flight. Returns its sequence number, if any.
    pub fn cancel_refresh(&self) -> Option<RefreshSeq> {
        let cancelled = self.lock().cancel_refresh();
        if let Some(seq) = cancelled {
            jokes_debug!("Refresh {} cancelled", seq);
        }
        cancelled
    }

    pub fn toggle_favorite(&self, id: JokeId) -> Result<FavoriteToggle, CoreError> {
        self.lock().toggle_favorite(id)
    }

    pub fn is_favorite(&self, id: JokeId) -> bool {
        self.lock().is_favorite(id)
    }

    pub fn rate(&self, id: JokeId, rating: Rating) -> Result<(), CoreError> {
        self.lock().rate(id, rating)
    }

    pub fn rating(&self, id: JokeId) -> Rating {
        self.lock().rating(id)
    }

    pub fn open_detail(&self, id: JokeId) -> Result<(), CoreError> {
        self.lock().open_detail(id)
    }

    pub fn status(&self, id: JokeId) -> JokeStatus {
        self.lock().status(id)
    }

    pub fn current(&self) -> Vec<Joke> {
        self.lock().current().to_vec()
    }

    pub fn favorites(&self) -> Vec<Joke> {
        self.lock().favorites().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn view(&self) -> CollectionViewModel {
        self.lock().view()
    }

    fn lock(&self) -> MutexGuard<'_, CollectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears loading for `seq` if the refresh future is dropped mid-flight.
struct RefreshGuard<'a> {
    state: &'a Mutex<CollectionState>,
    seq: RefreshSeq,
    armed: bool,
}

impl RefreshGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.fail_refresh(self.seq) {
            jokes_debug!("Refresh {} abandoned by its caller", self.seq);
        }
    }
}
