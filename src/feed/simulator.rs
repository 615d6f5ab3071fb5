//! Timer-driven event feed simulator
//!
//! Each running simulator owns one Tokio task that sleeps for a randomly
//! drawn delay, performs a single tick and re-arms with a fresh delay. Ticks
//! are serialized by construction. The engine and the running flag share one
//! lock: a tick only mutates the buffer while holding that lock and after
//! checking that its session is still the active one, so once
//! [`EventFeedSimulator::stop`] returns no further tick can land.

use crate::domain::Event;
use crate::error::Result;
use crate::feed::config::SimulatorConfig;
use crate::feed::engine::FeedEngine;
use crate::feed::filter::EventFilter;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct SimulatorState {
    engine: Option<FeedEngine>,
    running: bool,
    // Bumped on every successful start so a stale task can tell it was replaced
    session: u64,
    task: Option<JoinHandle<()>>,
}

impl SimulatorState {
    fn is_active(&self, session: u64) -> bool {
        self.running && self.session == session
    }
}

/// Simulated feed of synthetic events backing one monitoring panel
pub struct EventFeedSimulator {
    name: String,
    state: Arc<Mutex<SimulatorState>>,
    ticks: Arc<watch::Sender<u64>>,
}

impl EventFeedSimulator {
    pub fn new(name: impl Into<String>) -> Self {
        let (ticks, _) = watch::channel(0);
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(SimulatorState::default())),
            ticks: Arc::new(ticks),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Begin generating events
    ///
    /// Validates `config` and schedules the first tick after a delay drawn
    /// from its interval bounds. Starting an already running simulator is a
    /// no-op that keeps the buffer and the pending tick. Starting a stopped
    /// simulator begins a new session with a fresh buffer.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self, config), fields(feed = %self.name))]
    pub fn start(&self, config: SimulatorConfig) -> Result<()> {
        let mut state = self.state.lock();
        if state.running {
            debug!("Feed already running, ignoring start");
            return Ok(());
        }

        let mut engine = FeedEngine::new(&config).inspect_err(|e| {
            warn!("Rejected feed configuration: {}", e);
        })?;
        let runtime = Handle::try_current()?;

        let first_delay = engine.next_delay();
        let bounds = engine.bounds();
        state.session += 1;
        state.engine = Some(engine);
        state.running = true;

        let task = run_feed(
            self.name.clone(),
            Arc::clone(&self.state),
            Arc::clone(&self.ticks),
            state.session,
            first_delay,
        );
        state.task = Some(runtime.spawn(task));

        info!(
            "Feed started (interval {}ms..{}ms, first tick in {}ms)",
            bounds.min().as_millis(),
            bounds.max().as_millis(),
            first_delay.as_millis()
        );
        Ok(())
    }

    /// Halt generation and cancel the pending tick
    ///
    /// Idempotent. The buffer is kept readable until the next start.
    #[instrument(skip(self), fields(feed = %self.name))]
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if !state.running {
            return;
        }
        state.running = false;
        if let Some(task) = state.task.take() {
            task.abort();
        }
        info!(
            "Feed stopped after {} ticks",
            state.engine.as_ref().map_or(0, FeedEngine::tick_count)
        );
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Newest-first snapshot of the buffer, restricted to `filter`
    ///
    /// Empty before the first tick of the first session.
    pub fn current_events(&self, filter: &EventFilter) -> Vec<Event> {
        self.state
            .lock()
            .engine
            .as_ref()
            .map(|engine| engine.current_events(filter))
            .unwrap_or_default()
    }

    /// Ticks performed in the current (or last) session
    pub fn tick_count(&self) -> u64 {
        self.state
            .lock()
            .engine
            .as_ref()
            .map_or(0, FeedEngine::tick_count)
    }

    /// Change notifications, one per appended event
    ///
    /// The value is the number of ticks since this simulator was created and
    /// carries no meaning beyond "the buffer changed": re-read
    /// [`current_events`](Self::current_events) when it moves.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks.subscribe()
    }
}

impl Drop for EventFeedSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_feed(
    name: String,
    state: Arc<Mutex<SimulatorState>>,
    ticks: Arc<watch::Sender<u64>>,
    session: u64,
    first_delay: Duration,
) {
    let mut delay = first_delay;
    loop {
        tokio::time::sleep(delay).await;

        let mut guard = state.lock();
        if !guard.is_active(session) {
            break;
        }
        let Some(engine) = guard.engine.as_mut() else {
            break;
        };

        let event = engine.tick();
        delay = engine.next_delay();
        ticks.send_modify(|count| *count += 1);
        drop(guard);

        debug!(
            feed = %name,
            id = %event.id,
            category = %event.category,
            next_tick_ms = delay.as_millis() as u64,
            "Generated feed event"
        );
    }
    debug!(feed = %name, session, "Feed task exiting");
}
