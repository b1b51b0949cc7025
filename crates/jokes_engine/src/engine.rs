use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use jokes_core::RefreshSeq;
use jokes_logging::{jokes_debug, jokes_error};
use tokio::task::JoinHandle;

use crate::{EngineEvent, FailureKind, FetchError, JokeClient, JokeRequest};

enum EngineCommand {
    Fetch { seq: RefreshSeq, request: JokeRequest },
    Cancel { seq: RefreshSeq },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs fetches on a background tokio runtime for front-ends driven by a
/// synchronous event loop. Results are delivered through the [`EventSink`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn JokeClient>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || match tokio::runtime::Runtime::new() {
            Ok(runtime) => run(&runtime, client, sink, cmd_rx),
            Err(err) => {
                jokes_error!("Could not start the fetch runtime: {}", err);
                reject_all(sink.as_ref(), cmd_rx, &err.to_string());
            }
        });

        Self { cmd_tx }
    }

    pub fn fetch(&self, seq: RefreshSeq, request: JokeRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch { seq, request });
    }

    /// Aborts fetch `seq` if it is still running. Its result is never emitted.
    pub fn cancel(&self, seq: RefreshSeq) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { seq });
    }
}

fn run(
    runtime: &tokio::runtime::Runtime,
    client: Arc<dyn JokeClient>,
    sink: Arc<dyn EventSink>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
) {
    let mut tasks: HashMap<RefreshSeq, JoinHandle<()>> = HashMap::new();
    while let Ok(command) = cmd_rx.recv() {
        tasks.retain(|_, task| !task.is_finished());
        match command {
            EngineCommand::Fetch { seq, request } => {
                let client = client.clone();
                let sink = sink.clone();
                let task = runtime.spawn(async move {
                    let result = client.fetch_jokes(&request).await;
                    sink.emit(EngineEvent::JokesFetched { seq, result });
                });
                tasks.insert(seq, task);
            }
            EngineCommand::Cancel { seq } => {
                if let Some(task) = tasks.remove(&seq) {
                    task.abort();
                    jokes_debug!("Aborted fetch {}", seq);
                }
            }
        }
    }
}

fn reject_all(sink: &dyn EventSink, cmd_rx: mpsc::Receiver<EngineCommand>, reason: &str) {
    while let Ok(command) = cmd_rx.recv() {
        if let EngineCommand::Fetch { seq, .. } = command {
            sink.emit(EngineEvent::JokesFetched {
                seq,
                result: Err(FetchError::new(FailureKind::Network, reason)),
            });
        }
    }
}
