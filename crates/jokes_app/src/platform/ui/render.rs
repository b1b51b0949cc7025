use jokes_core::{CollectionViewModel, JokeDetailView, JokeRowView, JokeStatus, Notice, Rating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Jokes,
    Favorites,
}

/// Renders the view model as terminal lines: notice, then detail or list.
pub fn render(view: &CollectionViewModel, screen: Screen) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(notice) = &view.notice {
        lines.push(render_notice(notice));
    }
    if view.loading {
        lines.push("Loading jokes...".to_string());
    }

    match &view.selected {
        Some(detail) => render_detail(detail, &mut lines),
        None => match screen {
            Screen::Jokes => render_list("Jokes", &view.jokes, &mut lines),
            Screen::Favorites => render_list("Favorites", &view.favorites, &mut lines),
        },
    }
    lines
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Refreshed { count } => format!("Fetched {count} jokes."),
        Notice::RefreshFailed(failure) => format!("Refresh failed: {failure}"),
        Notice::RefreshCancelled => "Refresh cancelled.".to_string(),
        Notice::NotFound(id) => format!("No joke #{id} in the list or favorites."),
    }
}

fn render_list(title: &str, rows: &[JokeRowView], lines: &mut Vec<String>) {
    lines.push(format!("== {title} ({}) ==", rows.len()));
    if rows.is_empty() {
        lines.push("  (empty)".to_string());
    }
    for row in rows {
        let marker = if row.favorite { '*' } else { ' ' };
        lines.push(format!(
            "{marker} #{:<4} [{}] {}{}",
            row.id,
            row.category,
            row.headline,
            rating_suffix(row.rating)
        ));
    }
}

fn render_detail(detail: &JokeDetailView, lines: &mut Vec<String>) {
    lines.push(format!("== Joke #{} [{}] ==", detail.id, detail.category));
    lines.extend(detail.lines.iter().map(|line| format!("  {line}")));
    let flags = if detail.flags.is_empty() {
        "none".to_string()
    } else {
        detail.flags.join(", ")
    };
    lines.push(format!(
        "lang: {}  safe: {}  flags: {}",
        detail.lang,
        if detail.safe { "yes" } else { "no" },
        flags
    ));
    lines.push(format!(
        "favorite: {}  rating: {}  ({})",
        if detail.favorite { "yes" } else { "no" },
        detail.rating,
        status_label(detail.status)
    ));
}

fn rating_suffix(rating: Rating) -> &'static str {
    match rating {
        Rating::Up => "  (+1)",
        Rating::Down => "  (-1)",
        Rating::None => "",
    }
}

fn status_label(status: JokeStatus) -> &'static str {
    match status {
        JokeStatus::Unseen => "unseen",
        JokeStatus::Viewed => "viewed",
        JokeStatus::FavoritedRated => "favorited, rated",
        JokeStatus::FavoritedUnrated => "favorited",
        JokeStatus::UnfavoritedRated => "rated",
        JokeStatus::UnfavoritedUnrated => "no annotations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jokes_core::{update, CollectionState, Effect, FetchFailure, Joke, Msg};
    use pretty_assertions::assert_eq;

    fn view_after(msgs: Vec<Msg>) -> CollectionViewModel {
        let (mut state, effects) = update(CollectionState::new(), Msg::RefreshRequested { amount: 2 });
        let Some(Effect::FetchJokes { seq, .. }) = effects.first().cloned() else {
            panic!("expected fetch effect");
        };
        (state, _) = update(
            state,
            Msg::JokesFetched {
                seq,
                jokes: vec![
                    Joke::single(1, "Pun", "First line\nsecond line"),
                    Joke::two_part(2, "Programming", "Why?", "Because."),
                ],
            },
        );
        for msg in msgs {
            (state, _) = update(state, msg);
        }
        state.view()
    }

    #[test]
    fn list_marks_favorites_and_ratings() {
        let view = view_after(vec![
            Msg::FavoriteToggled(2),
            Msg::Rated {
                id: 1,
                rating: Rating::Up,
            },
        ]);
        assert_eq!(
            render(&view, Screen::Jokes),
            vec![
                "== Jokes (2) ==".to_string(),
                "  #1    [Pun] First line  (+1)".to_string(),
                "* #2    [Programming] Why?".to_string(),
            ]
        );
        assert_eq!(
            render(&view, Screen::Favorites),
            vec![
                "== Favorites (1) ==".to_string(),
                "* #2    [Programming] Why?".to_string(),
            ]
        );
    }

    #[test]
    fn detail_shows_all_lines_and_annotations() {
        let view = view_after(vec![Msg::DetailOpened(2), Msg::FavoriteToggled(2)]);
        assert_eq!(
            render(&view, Screen::Jokes),
            vec![
                "== Joke #2 [Programming] ==".to_string(),
                "  Why?".to_string(),
                "  Because.".to_string(),
                "lang: en  safe: yes  flags: none".to_string(),
                "favorite: yes  rating: none  (favorited)".to_string(),
            ]
        );
    }

    #[test]
    fn notices_are_rendered_first() {
        let view = view_after(vec![Msg::FavoriteToggled(9)]);
        assert_eq!(
            render(&view, Screen::Favorites)[0],
            "No joke #9 in the list or favorites."
        );

        let failed = Notice::RefreshFailed(FetchFailure::Network {
            message: "timeout".to_string(),
        });
        assert_eq!(
            render_notice(&failed),
            "Refresh failed: could not reach the joke service: timeout"
        );
    }
}
