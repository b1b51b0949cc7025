use std::sync::{mpsc, Arc};

use jokes_core::{Effect, Msg};
use jokes_engine::{EngineEvent, EngineHandle, EventSink, JokeCategory, JokeClient, JokeRequest};
use jokes_logging::{jokes_info, jokes_warn};

use super::app::AppEvent;

/// Executes core effects: fetches go to the engine, shares come back as text to print.
pub struct EffectRunner {
    engine: EngineHandle,
    category: JokeCategory,
}

impl EffectRunner {
    pub fn new(
        client: Arc<dyn JokeClient>,
        category: JokeCategory,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let sink = Arc::new(MsgSink { tx: event_tx });
        Self {
            engine: EngineHandle::new(client, sink),
            category,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<String> {
        let mut output = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchJokes { seq, amount } => {
                    jokes_info!(
                        "FetchJokes seq={} amount={} category={}",
                        seq,
                        amount,
                        self.category.as_path()
                    );
                    self.engine
                        .fetch(seq, JokeRequest::new(self.category, amount));
                }
                Effect::CancelFetch { seq } => {
                    jokes_info!("CancelFetch seq={}", seq);
                    self.engine.cancel(seq);
                }
                Effect::Share { id, text } => {
                    jokes_info!("Share joke {} ({} chars)", id, text.len());
                    output.push("--- share ---".to_string());
                    output.extend(text.lines().map(ToOwned::to_owned));
                    output.push("-------------".to_string());
                }
            }
        }
        output
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(to_msg(event)));
    }
}

pub(crate) fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JokesFetched {
            seq,
            result: Ok(response),
        } => Msg::JokesFetched {
            seq,
            jokes: response.jokes,
        },
        EngineEvent::JokesFetched {
            seq,
            result: Err(err),
        } => {
            jokes_warn!("Refresh {} failed: {}", seq, err);
            Msg::RefreshFailed {
                seq,
                failure: err.to_failure(),
            }
        }
    }
}
