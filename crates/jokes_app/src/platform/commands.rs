use jokes_core::{JokeId, Msg, Rating};

use super::ui::render::Screen;

pub const HELP: &str = "\
commands:
  refresh [n]            fetch a new batch (default size from settings)
  cancel                 abandon the refresh in flight
  list | favs            show the current batch or the favorites
  show <id> | close      open or leave the detail view
  fav <id>               add to or remove from favorites
  rate <id> up|down|none rate a joke for this session
  share <id>             print a joke ready to share
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Screen(Screen),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{0}` needs a joke id")]
    MissingId(&'static str),
    #[error("{0:?} is not a joke id")]
    BadId(String),
    #[error("{0:?} is not a rating; use up, down or none")]
    BadRating(String),
    #[error("{0:?} is not a positive amount")]
    BadAmount(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str, default_amount: u32) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "refresh" | "r" => {
            let amount = match words.next() {
                Some(raw) => parse_amount(raw)?,
                None => default_amount,
            };
            Command::Msg(Msg::RefreshRequested { amount })
        }
        "cancel" => Command::Msg(Msg::RefreshCancelled),
        "list" | "ls" => Command::Screen(Screen::Jokes),
        "favs" | "favorites" => Command::Screen(Screen::Favorites),
        "show" | "open" => Command::Msg(Msg::DetailOpened(parse_id("show", words.next())?)),
        "close" | "back" => Command::Msg(Msg::DetailClosed),
        "fav" | "f" => Command::Msg(Msg::FavoriteToggled(parse_id("fav", words.next())?)),
        "rate" => {
            let id = parse_id("rate", words.next())?;
            let rating = match words.next() {
                Some(raw) => parse_rating(raw)?,
                None => return Err(CommandError::BadRating(String::new())),
            };
            Command::Msg(Msg::Rated { id, rating })
        }
        "share" => Command::Msg(Msg::ShareRequested(parse_id("share", words.next())?)),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(head.to_string())),
    };
    Ok(Some(command))
}

fn parse_id(command: &'static str, raw: Option<&str>) -> Result<JokeId, CommandError> {
    let raw = raw.ok_or(CommandError::MissingId(command))?;
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::BadId(raw.to_string()))
}

fn parse_amount(raw: &str) -> Result<u32, CommandError> {
    match raw.parse::<u32>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(CommandError::BadAmount(raw.to_string())),
    }
}

fn parse_rating(raw: &str) -> Result<Rating, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "up" | "+" | "+1" => Ok(Rating::Up),
        "down" | "-" | "-1" => Ok(Rating::Down),
        "none" | "clear" => Ok(Rating::None),
        _ => Err(CommandError::BadRating(raw.to_string())),
    }
}
