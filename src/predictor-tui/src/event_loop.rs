//! Main event loop.
//!
//! One task owns the [`App`]. Terminal input, finished reference loads,
//! prediction answers and the spinner tick are multiplexed with
//! `tokio::select!`; network calls run in spawned tasks that own their request
//! and report back over channels.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use predictor_client::{PredictorApi, PredictorError};
use predictor_engine::{ReferenceUpdate, spawn_loads};
use predictor_protocol::{ExplainResponse, PredictRequest};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::app::{App, AppAction};
use crate::terminal::PredictorTerminal;
use crate::views;

/// Interval of the spinner tick.
pub const TICK_RATE: Duration = Duration::from_millis(80);

type PredictionReply = Result<ExplainResponse, PredictorError>;

/// Drives the form until the user quits.
pub struct EventLoop {
    pub(crate) app: App,
    api: Arc<dyn PredictorApi>,
    reference_tx: mpsc::UnboundedSender<ReferenceUpdate>,
    pub(crate) reference_rx: mpsc::UnboundedReceiver<ReferenceUpdate>,
    prediction_tx: mpsc::UnboundedSender<PredictionReply>,
    pub(crate) prediction_rx: mpsc::UnboundedReceiver<PredictionReply>,
    background_tasks: Vec<JoinHandle<()>>,
}

impl EventLoop {
    pub fn new(api: Arc<dyn PredictorApi>) -> Self {
        let (reference_tx, reference_rx) = mpsc::unbounded_channel();
        let (prediction_tx, prediction_rx) = mpsc::unbounded_channel();
        Self {
            app: App::new(),
            api,
            reference_tx,
            reference_rx,
            prediction_tx,
            prediction_rx,
            background_tasks: Vec::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Start the three reference loads concurrently.
    pub fn start_reference_loads(&mut self) {
        self.app.begin_reference_load();
        let handles = spawn_loads(Arc::clone(&self.api), self.reference_tx.clone());
        self.background_tasks.extend(handles);
    }

    /// Run until quit or until the terminal event stream ends.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or reading terminal events fails.
    pub async fn run(&mut self, terminal: &mut PredictorTerminal) -> Result<()> {
        info!("starting prediction form");
        self.start_reference_loads();

        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);
        terminal.draw(|frame| views::render(frame, &mut self.app))?;

        loop {
            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => {
                        error!("Error reading terminal event: {}", e);
                        return Err(e.into());
                    }
                    None => break,
                },

                Some(update) = self.reference_rx.recv() => {
                    debug!(kind = %update.kind, ok = update.result.is_ok(), "reference load finished");
                    self.app.apply_reference(update);
                }

                Some(reply) = self.prediction_rx.recv() => {
                    self.app.finish_prediction(reply);
                }

                _ = ticker.tick() => self.app.tick(),
            }

            if self.app.should_quit() {
                break;
            }
            terminal.draw(|frame| views::render(frame, &mut self.app))?;
        }

        self.shutdown();
        Ok(())
    }

    /// Route one terminal event to the app and act on the outcome.
    pub(crate) fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Release and repeat events are reported on some platforms.
            Event::Key(key) if key.kind == KeyEventKind::Press => self.app.handle_key(key),
            Event::Mouse(mouse) => self.app.handle_mouse(mouse),
            Event::Paste(text) => {
                self.app.handle_paste(&text);
                AppAction::None
            }
            _ => AppAction::None,
        };
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: AppAction) {
        match action {
            AppAction::Submit(request) => self.spawn_prediction(request),
            AppAction::Quit => info!("quit requested"),
            AppAction::None => {}
        }
    }

    fn spawn_prediction(&mut self, request: PredictRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.prediction_tx.clone();
        self.background_tasks.retain(|handle| !handle.is_finished());
        self.background_tasks.push(tokio::spawn(async move {
            let reply = api.predict_explain(&request).await;
            // The loop may already be gone when the user quit mid-request.
            let _ = tx.send(reply);
        }));
    }

    fn shutdown(&mut self) {
        for handle in self.background_tasks.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
