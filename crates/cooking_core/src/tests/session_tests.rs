use super::*;
use crate::fixtures::{jollof, recipe_with_durations};

fn started(recipe: Recipe) -> CookingSession {
    let mut session = CookingSession::new();
    session.start(recipe).expect("start session");
    session
}

#[test]
fn start_positions_on_first_step_with_stopped_timer() {
    let session = started(jollof());
    assert_eq!(session.current_step_index(), Some(0));
    assert_eq!(session.time_remaining_seconds(), 15 * 60);
    assert!(!session.is_timer_running());
    assert!(session.is_sound_enabled());
    assert_eq!(session.current_step().map(|s| s.title.as_str()), Some("Step 1"));
}

#[test]
fn start_rejects_recipe_without_steps() {
    let mut session = CookingSession::new();
    let err = session
        .start(recipe_with_durations(&[]))
        .expect_err("empty recipe");
    assert_eq!(err, SessionError::EmptyRecipe { recipe_id: RecipeId(1) });
    assert_eq!(session.state(), SessionState::NotStarted);
}

#[test]
fn failed_restart_keeps_running_session() {
    let mut session = started(jollof());
    session.next();
    assert!(session.start(recipe_with_durations(&[])).is_err());
    assert_eq!(session.current_step_index(), Some(1));
    assert_eq!(session.time_remaining_seconds(), 10 * 60);
}

#[test]
fn next_walks_every_step_and_reloads_timer() {
    let recipe = jollof();
    let durations: Vec<u32> = recipe.steps.iter().map(|s| s.duration).collect();
    let mut session = started(recipe);

    for i in 0..durations.len() - 1 {
        session.toggle_timer();
        session.tick();
        assert!(session.next());
        assert_eq!(session.current_step_index(), Some(i + 1));
        assert!(!session.is_timer_running());
        assert_eq!(session.time_remaining_seconds(), durations[i + 1] * 60);
    }
}

#[test]
fn next_at_last_step_is_noop() {
    let mut session = started(recipe_with_durations(&[1, 2]));
    assert!(session.next());
    session.toggle_timer();
    session.tick();
    let before = session.snapshot();

    assert!(!session.next());
    assert_eq!(session.snapshot(), before);
    assert!(session.is_last_step());
}

#[test]
fn previous_at_first_step_is_noop() {
    let mut session = started(jollof());
    session.toggle_timer();
    let before = session.snapshot();
    assert!(!session.previous());
    assert_eq!(session.snapshot(), before);
    assert!(session.is_timer_running());
}

#[test]
fn previous_reloads_earlier_step_duration() {
    let mut session = started(jollof());
    session.next();
    session.next();
    session.toggle_timer();
    assert!(session.previous());
    assert_eq!(session.current_step_index(), Some(1));
    assert_eq!(session.time_remaining_seconds(), 10 * 60);
    assert!(!session.is_timer_running());
}

#[test]
fn progress_follows_step_position() {
    let mut session = CookingSession::new();
    assert_eq!(session.progress_percentage(), 0.0);

    session.start(jollof()).expect("start");
    session.next();
    session.next();
    assert_eq!(session.progress_percentage(), 50.0);

    let mut last = 0.0;
    for _ in 0..3 {
        session.next();
        let progress = session.progress_percentage();
        assert!(progress > last);
        last = progress;
    }
    assert_eq!(session.progress_percentage(), 100.0);
}

#[test]
fn finish_only_from_last_step() {
    let mut session = CookingSession::new();
    assert_eq!(session.finish(), Err(SessionError::NotStarted));

    session.start(recipe_with_durations(&[3, 4, 5])).expect("start");
    assert_eq!(
        session.finish(),
        Err(SessionError::NotAtLastStep {
            step: 1,
            step_count: 3
        })
    );

    session.next();
    session.next();
    session.toggle_timer();
    session.finish().expect("finish");
    assert_eq!(session.state(), SessionState::Finished);
    assert!(!session.is_timer_running());
    assert_eq!(session.progress_percentage(), 100.0);
    assert!(!session.next());
    assert!(!session.previous());
    assert!(!session.toggle_timer());
    assert!(session.current_step().is_none());
}

#[test]
fn restart_after_finish_begins_again() {
    let mut session = started(recipe_with_durations(&[1]));
    session.finish().expect("finish");
    session.start(recipe_with_durations(&[7, 8])).expect("restart");
    assert_eq!(session.current_step_index(), Some(0));
    assert_eq!(session.time_remaining_seconds(), 420);
}

#[test]
fn countdown_reaches_zero_and_stops() {
    let mut session = started(recipe_with_durations(&[1]));
    session.toggle_timer();
    let mut completions = 0;
    for _ in 0..75 {
        if session.tick() == TickOutcome::Completed {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(session.time_remaining_seconds(), 0);
    assert!(!session.is_timer_running());
    assert!(!session.toggle_timer());
    assert_eq!(session.current_step_index(), Some(0));
}

#[test]
fn reset_after_partial_countdown_restores_duration() {
    let mut session = started(jollof());
    session.next();
    session.toggle_timer();
    for _ in 0..42 {
        session.tick();
    }
    assert_eq!(session.time_remaining_seconds(), 600 - 42);
    assert!(session.reset_timer());
    assert_eq!(session.time_remaining_seconds(), 600);
    assert!(!session.is_timer_running());
}

#[test]
fn stale_generation_ticks_are_dropped() {
    let mut session = started(jollof());
    session.toggle_timer();
    let issued_for = session.generation();
    assert!(matches!(
        session.tick_for(issued_for),
        TickOutcome::Ticked { .. }
    ));

    session.next();
    session.toggle_timer();
    assert_eq!(session.tick_for(issued_for), TickOutcome::Idle);
    assert_eq!(session.time_remaining_seconds(), 600);
}

#[test]
fn snapshot_reports_position_and_clock() {
    let mut session = started(jollof());
    session.next();
    session.toggle_sound();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.position_label().as_deref(), Some("Step 2 of 6"));
    assert_eq!(snapshot.time_display, "10:00");
    assert!(!snapshot.is_sound_enabled);
    assert!(!snapshot.is_last_step);
    assert_eq!(snapshot.recipe_name.as_deref(), Some("Jollof Rice with Chicken"));

    let json = serde_json::to_value(&snapshot).expect("json");
    assert_eq!(json["state"]["state"], "in_progress");
    assert_eq!(json["state"]["step_index"], 1);
}
