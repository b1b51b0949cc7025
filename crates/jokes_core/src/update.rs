use crate::view_model::Notice;
use crate::{CollectionState, Effect, Msg, RefreshApplied};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: CollectionState, msg: Msg) -> (CollectionState, Vec<Effect>) {
    // A notice answers the latest user intent; engine results keep it until they replace it.
    if !matches!(msg, Msg::JokesFetched { .. } | Msg::RefreshFailed { .. }) {
        state.clear_notice();
    }

    let effects = match msg {
        Msg::RefreshRequested { amount } => {
            // Only the newest refresh is applied; tell the engine to drop the older one.
            let superseded = state.in_flight();
            let seq = state.begin_refresh();
            let mut effects = Vec::with_capacity(1 + usize::from(superseded.is_some()));
            if let Some(old) = superseded {
                effects.push(Effect::CancelFetch { seq: old });
            }
            effects.push(Effect::FetchJokes { seq, amount });
            effects
        }
        Msg::RefreshCancelled => match state.cancel_refresh() {
            Some(seq) => {
                state.set_notice(Notice::RefreshCancelled);
                vec![Effect::CancelFetch { seq }]
            }
            None => Vec::new(),
        },
        Msg::JokesFetched { seq, jokes } => {
            match state.finish_refresh(seq, jokes) {
                RefreshApplied::Applied { count } => state.set_notice(Notice::Refreshed { count }),
                RefreshApplied::Stale => {}
            }
            Vec::new()
        }
        Msg::RefreshFailed { seq, failure } => {
            if state.fail_refresh(seq) {
                state.set_notice(Notice::RefreshFailed(failure));
            }
            Vec::new()
        }
        Msg::DetailOpened(id) => {
            if let Err(err) = state.open_detail(id) {
                state.report(err);
            }
            Vec::new()
        }
        Msg::DetailClosed => {
            state.close_detail();
            Vec::new()
        }
        Msg::FavoriteToggled(id) => {
            if let Err(err) = state.toggle_favorite(id) {
                state.report(err);
            }
            Vec::new()
        }
        Msg::Rated { id, rating } => {
            if let Err(err) = state.rate(id, rating) {
                state.report(err);
            }
            Vec::new()
        }
        Msg::ShareRequested(id) => match state.find(id) {
            Some(joke) => vec![Effect::Share {
                id,
                text: joke.share_text(),
            }],
            None => {
                state.set_notice(Notice::NotFound(id));
                Vec::new()
            }
        },
    };

    (state, effects)
}
