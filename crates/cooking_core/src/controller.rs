//! Presenter that owns one [`CookingSession`] and its one-second tick task.

use std::{sync::Arc, time::Duration};

use shared::domain::{Recipe, RecipeId};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    session::{CookingSession, SessionError, SessionSnapshot, SessionState},
    timer::TickOutcome,
};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
const EVENT_CHANNEL_CAPACITY: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started {
        recipe_id: RecipeId,
        step_count: usize,
    },
    StepChanged {
        step_index: usize,
        time_remaining_seconds: u32,
    },
    TimerStarted {
        remaining_seconds: u32,
    },
    TimerPaused {
        remaining_seconds: u32,
    },
    TimerReset {
        remaining_seconds: u32,
    },
    Tick {
        remaining_seconds: u32,
    },
    /// The countdown for `step_index` hit zero. The step itself is not
    /// advanced; that stays an explicit user action.
    TimerCompleted {
        step_index: usize,
        play_sound: bool,
    },
    SoundToggled {
        enabled: bool,
    },
    Finished {
        recipe_id: RecipeId,
    },
    Exited,
}

pub struct CookingController {
    session: Arc<Mutex<CookingSession>>,
    tick_task: Option<JoinHandle<()>>,
    events: broadcast::Sender<SessionEvent>,
    tick_period: Duration,
}

impl Default for CookingController {
    fn default() -> Self {
        Self::new()
    }
}

impl CookingController {
    pub fn new() -> Self {
        Self::with_tick_period(TICK_PERIOD)
    }

    pub fn with_tick_period(tick_period: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Arc::new(Mutex::new(CookingSession::new())),
            tick_task: None,
            events,
            tick_period,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Current step's full record, for presenters that show description and tip.
    pub async fn current_step(&self) -> Option<shared::domain::Step> {
        self.session.lock().await.current_step().cloned()
    }

    pub async fn start(&mut self, recipe: Recipe) -> Result<SessionSnapshot, SessionError> {
        let recipe_id = recipe.id;
        let step_count = recipe.steps.len();
        let handle = Arc::clone(&self.session);
        let mut session = handle.lock().await;
        session.start(recipe)?;
        self.cancel_tick_task();
        self.emit(SessionEvent::Started {
            recipe_id,
            step_count,
        });
        Ok(session.snapshot())
    }

    pub async fn next(&mut self) -> bool {
        let handle = Arc::clone(&self.session);
        let mut session = handle.lock().await;
        if !session.next() {
            return false;
        }
        self.cancel_tick_task();
        self.emit_step_changed(&session);
        true
    }

    pub async fn previous(&mut self) -> bool {
        let handle = Arc::clone(&self.session);
        let mut session = handle.lock().await;
        if !session.previous() {
            return false;
        }
        self.cancel_tick_task();
        self.emit_step_changed(&session);
        true
    }

    /// Starts or pauses the countdown. Starting spawns the tick task; pausing
    /// cancels it.
    pub async fn toggle_timer(&mut self) -> bool {
        let handle = Arc::clone(&self.session);
        let mut session = handle.lock().await;
        if !session.toggle_timer() {
            return false;
        }
        let remaining_seconds = session.time_remaining_seconds();
        if session.is_timer_running() {
            self.spawn_tick_task(session.generation());
            self.emit(SessionEvent::TimerStarted { remaining_seconds });
        } else {
            self.cancel_tick_task();
            self.emit(SessionEvent::TimerPaused { remaining_seconds });
        }
        true
    }

    pub async fn reset_timer(&mut self) -> bool {
        let handle = Arc::clone(&self.session);
        let mut session = handle.lock().await;
        if !session.reset_timer() {
            return false;
        }
        self.cancel_tick_task();
        self.emit(SessionEvent::TimerReset {
            remaining_seconds: session.time_remaining_seconds(),
        });
        true
    }

    pub async fn toggle_sound(&mut self) -> bool {
        let enabled = self.session.lock().await.toggle_sound();
        self.emit(SessionEvent::SoundToggled { enabled });
        enabled
    }

    pub async fn finish(&mut self) -> Result<SessionSnapshot, SessionError> {
        let handle = Arc::clone(&self.session);
        let mut session = handle.lock().await;
        session.finish()?;
        self.cancel_tick_task();
        if let Some(recipe) = session.recipe() {
            self.emit(SessionEvent::Finished {
                recipe_id: recipe.id,
            });
        }
        Ok(session.snapshot())
    }

    /// Tears the session down. The sound preference survives.
    pub async fn exit(&mut self) {
        let handle = Arc::clone(&self.session);
        let mut session = handle.lock().await;
        self.cancel_tick_task();
        let sound_enabled = session.is_sound_enabled();
        *session = CookingSession::new();
        if !sound_enabled {
            session.toggle_sound();
        }
        info!("cooking session closed");
        self.emit(SessionEvent::Exited);
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state()
    }

    pub fn has_active_ticker(&self) -> bool {
        self.tick_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    fn spawn_tick_task(&mut self, generation: u64) {
        self.cancel_tick_task();
        let session = Arc::clone(&self.session);
        let events = self.events.clone();
        let period = self.tick_period;
        debug!(generation, "spawning tick task");
        self.tick_task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let (outcome, step_index, play_sound) = {
                    let mut guard = session.lock().await;
                    let outcome = guard.tick_for(generation);
                    (
                        outcome,
                        guard.current_step_index(),
                        guard.is_sound_enabled(),
                    )
                };
                match outcome {
                    TickOutcome::Ticked { remaining_seconds } => {
                        let _ = events.send(SessionEvent::Tick { remaining_seconds });
                    }
                    TickOutcome::Completed => {
                        let _ = events.send(SessionEvent::Tick {
                            remaining_seconds: 0,
                        });
                        if let Some(step_index) = step_index {
                            let _ = events.send(SessionEvent::TimerCompleted {
                                step_index,
                                play_sound,
                            });
                        }
                        break;
                    }
                    TickOutcome::Idle => break,
                }
            }
            debug!(generation, "tick task ended");
        }));
    }

    fn cancel_tick_task(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }

    fn emit_step_changed(&self, session: &CookingSession) {
        if let Some(step_index) = session.current_step_index() {
            self.emit(SessionEvent::StepChanged {
                step_index,
                time_remaining_seconds: session.time_remaining_seconds(),
            });
        }
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for CookingController {
    fn drop(&mut self) {
        self.cancel_tick_task();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
