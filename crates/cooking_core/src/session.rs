//! Step navigation for one guided cooking session.
//!
//! A [`CookingSession`] walks a recipe's steps in order and owns the
//! [`StepTimer`] for whichever step is current. Moving between steps always
//! reloads the timer with the new step's duration and leaves it stopped, so a
//! countdown never carries over from one step to the next.

use serde::Serialize;
use shared::domain::{Recipe, RecipeId, Step};
use thiserror::Error;
use tracing::{debug, info};

use crate::timer::{format_clock, StepTimer, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress { step_index: usize },
    Finished,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("recipe {recipe_id} has no steps to cook")]
    EmptyRecipe { recipe_id: RecipeId },
    #[error("no cooking session in progress")]
    NotStarted,
    #[error("cannot finish at step {step} of {step_count}")]
    NotAtLastStep { step: usize, step_count: usize },
}

/// Read-only view of a session for presenters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub recipe_id: Option<RecipeId>,
    pub recipe_name: Option<String>,
    pub state: SessionState,
    pub step_count: usize,
    pub step_title: Option<String>,
    pub time_remaining_seconds: u32,
    pub time_display: String,
    pub is_timer_running: bool,
    pub is_sound_enabled: bool,
    pub is_last_step: bool,
    pub progress_percentage: f64,
}

impl SessionSnapshot {
    /// `Step 3 of 6`, or `None` outside a running session.
    pub fn position_label(&self) -> Option<String> {
        match self.state {
            SessionState::InProgress { step_index } => {
                Some(format!("Step {} of {}", step_index + 1, self.step_count))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CookingSession {
    recipe: Option<Recipe>,
    state: SessionState,
    timer: StepTimer,
    sound_enabled: bool,
    generation: u64,
}

impl Default for CookingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CookingSession {
    pub fn new() -> Self {
        Self {
            recipe: None,
            state: SessionState::NotStarted,
            timer: StepTimer::new(0),
            sound_enabled: true,
            generation: 0,
        }
    }

    /// Begins cooking `recipe` at its first step with the timer stopped.
    ///
    /// A recipe without steps is rejected and the current session, if any, is
    /// left as it was.
    pub fn start(&mut self, recipe: Recipe) -> Result<(), SessionError> {
        let Some(first) = recipe.steps.first() else {
            return Err(SessionError::EmptyRecipe {
                recipe_id: recipe.id,
            });
        };
        self.timer.load(first.duration_seconds());
        info!(
            recipe_id = recipe.id.0,
            steps = recipe.steps.len(),
            "cooking session started"
        );
        self.recipe = Some(recipe);
        self.state = SessionState::InProgress { step_index: 0 };
        self.bump_generation();
        Ok(())
    }

    /// Advances one step. Returns `false` at the last step or outside a session.
    pub fn next(&mut self) -> bool {
        let Some(index) = self.current_step_index() else {
            return false;
        };
        if index + 1 >= self.step_count() {
            return false;
        }
        self.move_to(index + 1);
        true
    }

    /// Goes back one step. Returns `false` at the first step or outside a session.
    pub fn previous(&mut self) -> bool {
        match self.current_step_index() {
            Some(index) if index > 0 => {
                self.move_to(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Ends the session from its last step.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        let index = self.current_step_index().ok_or(SessionError::NotStarted)?;
        let step_count = self.step_count();
        if index + 1 != step_count {
            return Err(SessionError::NotAtLastStep {
                step: index + 1,
                step_count,
            });
        }
        self.timer.stop();
        self.state = SessionState::Finished;
        self.bump_generation();
        info!(
            recipe_id = self.recipe.as_ref().map(|r| r.id.0),
            "cooking session finished"
        );
        Ok(())
    }

    /// Starts or pauses the countdown. Returns whether anything changed.
    pub fn toggle_timer(&mut self) -> bool {
        if self.current_step_index().is_none() {
            return false;
        }
        let changed = self.timer.toggle();
        if changed {
            self.bump_generation();
            debug!(
                running = self.timer.is_running(),
                remaining = self.timer.remaining_seconds(),
                "timer toggled"
            );
        }
        changed
    }

    pub fn reset_timer(&mut self) -> bool {
        if self.current_step_index().is_none() {
            return false;
        }
        self.timer.reset();
        self.bump_generation();
        true
    }

    /// Returns the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Applies one tick to the current countdown.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_for(self.generation)
    }

    /// Applies a tick issued for `generation`. Ticks from an older generation
    /// belong to a countdown that was paused, reset or left, and are dropped.
    pub fn tick_for(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation || self.current_step_index().is_none() {
            return TickOutcome::Idle;
        }
        let outcome = self.timer.tick();
        if outcome == TickOutcome::Completed {
            debug!(step_index = ?self.current_step_index(), "step timer reached zero");
        }
        outcome
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_step_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { step_index } => Some(step_index),
            _ => None,
        }
    }

    pub fn current_step(&self) -> Option<&Step> {
        let index = self.current_step_index()?;
        self.recipe.as_ref()?.step(index)
    }

    pub fn step_count(&self) -> usize {
        self.recipe.as_ref().map_or(0, |r| r.steps.len())
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step_index()
            .is_some_and(|index| index + 1 == self.step_count())
    }

    pub fn progress_percentage(&self) -> f64 {
        match self.state {
            SessionState::NotStarted => 0.0,
            SessionState::InProgress { step_index } => {
                (step_index + 1) as f64 / self.step_count() as f64 * 100.0
            }
            SessionState::Finished => 100.0,
        }
    }

    pub fn time_remaining_seconds(&self) -> u32 {
        self.timer.remaining_seconds()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn time_display(&self) -> String {
        format_clock(self.timer.remaining_seconds())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            recipe_id: self.recipe.as_ref().map(|r| r.id),
            recipe_name: self.recipe.as_ref().map(|r| r.name.clone()),
            state: self.state,
            step_count: self.step_count(),
            step_title: self.current_step().map(|s| s.title.clone()),
            time_remaining_seconds: self.timer.remaining_seconds(),
            time_display: self.time_display(),
            is_timer_running: self.timer.is_running(),
            is_sound_enabled: self.sound_enabled,
            is_last_step: self.is_last_step(),
            progress_percentage: self.progress_percentage(),
        }
    }

    fn move_to(&mut self, index: usize) {
        let duration = self
            .recipe
            .as_ref()
            .and_then(|r| r.step(index))
            .map_or(0, Step::duration_seconds);
        self.timer.load(duration);
        self.state = SessionState::InProgress { step_index: index };
        self.bump_generation();
        debug!(step_index = index, duration, "moved to step");
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
