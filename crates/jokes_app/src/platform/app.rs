use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::{DateTime, Local};
use jokes_core::{update, CollectionState, Msg, Notice};
use jokes_engine::ReqwestJokeClient;
use jokes_logging::{jokes_debug, jokes_info};

use super::commands::{self, Command, HELP};
use super::effects::EffectRunner;
use super::settings::AppSettings;
use super::ui::render::{self, Screen};

pub(crate) enum AppEvent {
    Input(String),
    InputClosed,
    Engine(Msg),
}

pub fn run(settings: AppSettings) -> anyhow::Result<()> {
    let client = ReqwestJokeClient::new(settings.client_settings())?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

    let effects = EffectRunner::new(Arc::new(client), settings.category, event_tx.clone());
    let mut app = App::new(effects, settings.amount, io::stdout());

    spawn_input_reader(event_tx);
    jokes_info!("Starting with category {:?}", settings.category);

    writeln!(app.out, "Type `help` for commands.")?;
    app.dispatch(Msg::RefreshRequested {
        amount: settings.amount,
    })?;

    while let Ok(event) = event_rx.recv() {
        let keep_going = match event {
            AppEvent::Input(line) => app.handle_line(&line)?,
            AppEvent::InputClosed => false,
            AppEvent::Engine(msg) => {
                app.dispatch(msg)?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    jokes_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

struct App<W: Write> {
    state: CollectionState,
    screen: Screen,
    effects: EffectRunner,
    default_amount: u32,
    last_refresh: Option<DateTime<Local>>,
    out: W,
}

impl<W: Write> App<W> {
    fn new(effects: EffectRunner, default_amount: u32, out: W) -> Self {
        Self {
            state: CollectionState::new(),
            screen: Screen::default(),
            effects,
            default_amount,
            last_refresh: None,
            out,
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match commands::parse(line, self.default_amount) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => return Ok(false),
            Ok(Some(Command::Help)) => writeln!(self.out, "{HELP}")?,
            Ok(Some(Command::Screen(screen))) => {
                self.screen = screen;
                self.state.close_detail();
                self.state.consume_dirty();
                self.render()?;
            }
            Ok(Some(Command::Msg(msg))) => self.dispatch(msg)?,
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(true)
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        jokes_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        if was_dirty && matches!(state.notice(), Some(Notice::Refreshed { .. })) {
            self.last_refresh = Some(Local::now());
        }
        self.state = state;

        for line in self.effects.run(effects) {
            writeln!(self.out, "{line}")?;
        }
        if was_dirty {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        if let Some(at) = self.last_refresh {
            writeln!(self.out, "(last refresh {})", at.format("%H:%M:%S"))?;
        }
        for line in render::render(&view, self.screen) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use jokes_core::{Joke, JokeResponse};
    use jokes_engine::{FetchError, JokeCategory, JokeClient, JokeRequest};

    /// Returns `amount` single jokes numbered from 1.
    struct CountingClient;

    #[async_trait::async_trait]
    impl JokeClient for CountingClient {
        async fn fetch_jokes(&self, request: &JokeRequest) -> Result<JokeResponse, FetchError> {
            Ok(JokeResponse::from_jokes(
                (1..=u64::from(request.amount))
                    .map(|id| Joke::single(id, "Pun", format!("pun {id}")))
                    .collect(),
            ))
        }
    }

    fn app() -> (App<Vec<u8>>, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let effects = EffectRunner::new(Arc::new(CountingClient), JokeCategory::Pun, tx);
        (App::new(effects, 2, Vec::new()), rx)
    }

    fn pump_engine(app: &mut App<Vec<u8>>, rx: &mpsc::Receiver<AppEvent>) {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(AppEvent::Engine(msg)) => app.dispatch(msg).unwrap(),
            _ => panic!("expected an engine event"),
        }
    }

    fn take_output(app: &mut App<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut app.out)).unwrap()
    }

    #[test]
    fn refresh_command_round_trips_through_the_engine() {
        let (mut app, rx) = app();
        assert!(app.handle_line("refresh").unwrap());
        assert!(take_output(&mut app).contains("Loading jokes..."));

        pump_engine(&mut app, &rx);
        let output = take_output(&mut app);
        assert!(output.contains("Fetched 2 jokes."), "{output}");
        assert!(output.contains("#1    [Pun] pun 1"), "{output}");
        assert!(output.contains("#2    [Pun] pun 2"), "{output}");
        assert!(app.last_refresh.is_some());
    }

    #[test]
    fn favorites_screen_lists_toggled_jokes() {
        let (mut app, rx) = app();
        app.handle_line("refresh 3").unwrap();
        pump_engine(&mut app, &rx);

        app.handle_line("fav 2").unwrap();
        take_output(&mut app);
        app.handle_line("favs").unwrap();

        let output = take_output(&mut app);
        assert!(output.contains("== Favorites (1) =="), "{output}");
        assert!(output.contains("* #2    [Pun] pun 2"), "{output}");
    }

    #[test]
    fn share_prints_the_joke() {
        let (mut app, rx) = app();
        app.handle_line("refresh 1").unwrap();
        pump_engine(&mut app, &rx);
        take_output(&mut app);

        app.handle_line("share 1").unwrap();
        let output = take_output(&mut app);
        assert!(output.contains("--- share ---\n[Pun] pun 1\n"), "{output}");
    }

    #[test]
    fn bad_input_is_reported_and_quit_stops() {
        let (mut app, _rx) = app();
        assert!(app.handle_line("rate x up").unwrap());
        assert!(take_output(&mut app).contains("\"x\" is not a joke id"));
        assert!(!app.handle_line("quit").unwrap());
    }
}
