use std::collections::{BTreeMap, BTreeSet};

use crate::view_model::{CollectionViewModel, JokeDetailView, JokeRowView, Notice};
use crate::{CoreError, Joke, JokeId, Rating};

/// Monotonically increasing tag of a refresh call.
pub type RefreshSeq = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshApplied {
    Applied { count: usize },
    /// A later refresh was started, or this one was cancelled; the batch was discarded.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Session-scoped lifecycle of a single joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokeStatus {
    Unseen,
    Viewed,
    FavoritedRated,
    FavoritedUnrated,
    UnfavoritedRated,
    UnfavoritedUnrated,
}

/// Authoritative joke collection: the current batch, the favorites copied out
/// of it, and the per-session annotations keyed by joke id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionState {
    current: Vec<Joke>,
    favorites: Vec<Joke>,
    ratings: BTreeMap<JokeId, Rating>,
    viewed: BTreeSet<JokeId>,
    // Ids that went through toggle_favorite or rate at least once.
    annotated: BTreeSet<JokeId>,
    selected: Option<JokeId>,
    last_seq: RefreshSeq,
    in_flight: Option<RefreshSeq>,
    notice: Option<Notice>,
    dirty: bool,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &[Joke] {
        &self.current
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> &[Joke] {
        &self.favorites
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The refresh whose result will be applied, if any.
    pub fn in_flight(&self) -> Option<RefreshSeq> {
        self.in_flight
    }

    /// Looks a joke up in the current batch first, then in favorites.
    pub fn find(&self, id: JokeId) -> Option<&Joke> {
        self.current
            .iter()
            .chain(self.favorites.iter())
            .find(|joke| joke.id == id)
    }

    pub fn contains(&self, id: JokeId) -> bool {
        self.find(id).is_some()
    }

    pub fn is_favorite(&self, id: JokeId) -> bool {
        self.favorites.iter().any(|joke| joke.id == id)
    }

    pub fn rating(&self, id: JokeId) -> Rating {
        self.ratings.get(&id).copied().unwrap_or_default()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn selected(&self) -> Option<JokeId> {
        self.selected
    }

    pub fn status(&self, id: JokeId) -> JokeStatus {
        if !self.annotated.contains(&id) {
            return if self.viewed.contains(&id) {
                JokeStatus::Viewed
            } else {
                JokeStatus::Unseen
            };
        }
        match (self.is_favorite(id), self.rating(id) != Rating::None) {
            (true, true) => JokeStatus::FavoritedRated,
            (true, false) => JokeStatus::FavoritedUnrated,
            (false, true) => JokeStatus::UnfavoritedRated,
            (false, false) => JokeStatus::UnfavoritedUnrated,
        }
    }

    /// Starts a refresh and makes it the only one whose result will be applied.
    pub fn begin_refresh(&mut self) -> RefreshSeq {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);
        self.dirty = true;
        self.last_seq
    }

    /// Replaces the current batch if `seq` is still the refresh in flight.
    ///
    /// Favorites are left alone. Annotations of ids that are neither in the new
    /// batch nor favorited are dropped.
    pub fn finish_refresh(&mut self, seq: RefreshSeq, jokes: Vec<Joke>) -> RefreshApplied {
        if self.in_flight != Some(seq) {
            return RefreshApplied::Stale;
        }
        self.in_flight = None;
        let count = jokes.len();
        self.current = jokes;
        self.prune_annotations();
        self.dirty = true;
        RefreshApplied::Applied { count }
    }

    /// Clears loading if `seq` is the refresh in flight. Returns whether it was.
    pub fn fail_refresh(&mut self, seq: RefreshSeq) -> bool {
        if self.in_flight != Some(seq) {
            return false;
        }
        self.in_flight = None;
        self.dirty = true;
        true
    }

    /// Abandons the refresh in flight; its eventual result will be discarded.
    pub fn cancel_refresh(&mut self) -> Option<RefreshSeq> {
        let cancelled = self.in_flight.take();
        if cancelled.is_some() {
            self.dirty = true;
        }
        cancelled
    }

    /// Removes `id` from favorites if present, otherwise copies it from the current batch.
    pub fn toggle_favorite(&mut self, id: JokeId) -> Result<FavoriteToggle, CoreError> {
        if let Some(pos) = self.favorites.iter().position(|joke| joke.id == id) {
            self.favorites.remove(pos);
            self.ratings.remove(&id);
            self.annotated.insert(id);
            self.dirty = true;
            return Ok(FavoriteToggle::Removed);
        }

        let joke = self
            .current
            .iter()
            .find(|joke| joke.id == id)
            .cloned()
            .ok_or(CoreError::NotFound(id))?;
        self.favorites.push(joke);
        self.annotated.insert(id);
        self.dirty = true;
        Ok(FavoriteToggle::Added)
    }

    /// Overwrites the rating of `id`; `Rating::None` clears it.
    pub fn rate(&mut self, id: JokeId, rating: Rating) -> Result<(), CoreError> {
        if !self.contains(id) {
            return Err(CoreError::NotFound(id));
        }
        match rating {
            Rating::None => {
                self.ratings.remove(&id);
            }
            rating => {
                self.ratings.insert(id, rating);
            }
        }
        self.annotated.insert(id);
        self.dirty = true;
        Ok(())
    }

    pub fn open_detail(&mut self, id: JokeId) -> Result<(), CoreError> {
        if !self.contains(id) {
            return Err(CoreError::NotFound(id));
        }
        self.viewed.insert(id);
        self.selected = Some(id);
        self.dirty = true;
        Ok(())
    }

    pub fn close_detail(&mut self) {
        if self.selected.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn view(&self) -> CollectionViewModel {
        CollectionViewModel {
            jokes: self.current.iter().map(|joke| self.row(joke)).collect(),
            favorites: self.favorites.iter().map(|joke| self.row(joke)).collect(),
            loading: self.is_loading(),
            selected: self
                .selected
                .and_then(|id| self.find(id))
                .map(|joke| self.detail(joke)),
            notice: self.notice.clone(),
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn report(&mut self, err: CoreError) {
        match err {
            CoreError::NotFound(id) => self.set_notice(Notice::NotFound(id)),
        }
    }

    fn prune_annotations(&mut self) {
        let live: BTreeSet<JokeId> = self
            .current
            .iter()
            .chain(self.favorites.iter())
            .map(|joke| joke.id)
            .collect();
        self.ratings.retain(|id, _| live.contains(id));
        self.viewed.retain(|id| live.contains(id));
        self.annotated.retain(|id| live.contains(id));
        if self.selected.is_some_and(|id| !live.contains(&id)) {
            self.selected = None;
        }
    }

    fn row(&self, joke: &Joke) -> JokeRowView {
        JokeRowView {
            id: joke.id,
            category: joke.category.clone(),
            headline: joke.headline().to_string(),
            favorite: self.is_favorite(joke.id),
            rating: self.rating(joke.id),
        }
    }

    fn detail(&self, joke: &Joke) -> JokeDetailView {
        JokeDetailView {
            id: joke.id,
            category: joke.category.clone(),
            lines: joke.lines().into_iter().map(ToOwned::to_owned).collect(),
            flags: joke.flags.active(),
            safe: joke.safe,
            lang: joke.lang.clone(),
            favorite: self.is_favorite(joke.id),
            rating: self.rating(joke.id),
            status: self.status(joke.id),
        }
    }
}
