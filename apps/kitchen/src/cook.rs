//! Line-driven cooking session on the terminal.

use std::io::Write;

use anyhow::Result;
use cooking_core::{format_clock, CookingController, SessionEvent, SessionState};
use shared::domain::Recipe;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};

const HELP: &str = "keys: n next/finish, p previous, t start/pause, r reset, s sound, i status, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookCommand {
    Next,
    Previous,
    ToggleTimer,
    ResetTimer,
    ToggleSound,
    Status,
    Help,
    Quit,
}

impl CookCommand {
    pub fn parse(input: &str) -> Option<Self> {
        let command = match input.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "t" | "timer" => Self::ToggleTimer,
            "r" | "reset" => Self::ResetTimer,
            "s" | "sound" => Self::ToggleSound,
            "i" | "info" | "status" => Self::Status,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

/// Runs one session, reading commands line by line from `input` until the
/// recipe is finished, the user quits, or input ends.
pub async fn run_session<R>(recipe: Recipe, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut controller = CookingController::new();
    let printer = spawn_event_printer(controller.subscribe_events());

    print_intro(&recipe);
    controller.start(recipe).await?;
    print_step(&controller).await;
    println!("{HELP}");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = CookCommand::parse(&line) else {
            println!("unknown command '{}'; {HELP}", line.trim());
            continue;
        };
        if apply(&mut controller, command).await? == Flow::Done {
            break;
        }
    }

    if matches!(controller.state().await, SessionState::InProgress { .. }) {
        controller.exit().await;
    }
    drop(controller);
    let _ = printer.await;
    Ok(())
}

pub async fn apply(controller: &mut CookingController, command: CookCommand) -> Result<Flow> {
    match command {
        CookCommand::Next => {
            if controller.next().await {
                print_step(controller).await;
            } else {
                let snapshot = controller.finish().await?;
                println!(
                    "Finished {}. Enjoy your meal!",
                    snapshot.recipe_name.as_deref().unwrap_or("cooking")
                );
                return Ok(Flow::Done);
            }
        }
        CookCommand::Previous => {
            if controller.previous().await {
                print_step(controller).await;
            } else {
                println!("already at the first step");
            }
        }
        CookCommand::ToggleTimer => {
            if !controller.toggle_timer().await {
                let step_seconds = controller
                    .current_step()
                    .await
                    .map_or(0, |step| step.duration_seconds());
                println!("{}", timer_refusal(step_seconds));
            }
        }
        CookCommand::ResetTimer => {
            controller.reset_timer().await;
        }
        CookCommand::ToggleSound => {
            controller.toggle_sound().await;
        }
        CookCommand::Status => print_status(controller).await,
        CookCommand::Help => println!("{HELP}"),
        CookCommand::Quit => {
            controller.exit().await;
            return Ok(Flow::Done);
        }
    }
    Ok(Flow::Continue)
}

/// Why the timer did not start: the step is untimed, or its countdown ran out.
fn timer_refusal(step_seconds: u32) -> &'static str {
    if step_seconds == 0 {
        "this step has no timer"
    } else {
        "timer is at 00:00; press r to reset it"
    }
}

fn print_intro(recipe: &Recipe) {
    println!();
    println!("{}", recipe.name);
    let mut meta = vec![
        recipe.total_time_display(),
        recipe.difficulty.to_string(),
        format!("{} servings", recipe.servings),
    ];
    if let Some(region) = &recipe.region {
        meta.insert(0, region.clone());
    }
    println!("{}", meta.join(" · "));
    if !recipe.cultural_note.is_empty() {
        println!("Cultural context: {}", recipe.cultural_note);
    }
}

async fn print_step(controller: &CookingController) {
    let snapshot = controller.snapshot().await;
    let Some(step) = controller.current_step().await else {
        return;
    };
    println!();
    println!(
        "{} ({:.0}%): {}",
        snapshot.position_label().unwrap_or_default(),
        snapshot.progress_percentage,
        step.title
    );
    println!("  {}", step.description);
    if !step.tip.is_empty() {
        println!("  Tip: {}", step.tip);
    }
    println!("  Timer: {} (t to start)", snapshot.time_display);
}

async fn print_status(controller: &CookingController) {
    let snapshot = controller.snapshot().await;
    println!(
        "{} · {} {} · sound {}",
        snapshot.position_label().unwrap_or_else(|| "no step".into()),
        snapshot.time_display,
        if snapshot.is_timer_running {
            "running"
        } else {
            "paused"
        },
        if snapshot.is_sound_enabled { "on" } else { "off" },
    );
}

fn spawn_event_printer(mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            };
            match event {
                SessionEvent::Tick { remaining_seconds } => {
                    print!("\r  {} ", format_clock(remaining_seconds));
                    let _ = std::io::stdout().flush();
                }
                SessionEvent::TimerStarted { remaining_seconds } => {
                    println!("  timer started at {}", format_clock(remaining_seconds));
                }
                SessionEvent::TimerPaused { remaining_seconds } => {
                    println!("\r  timer paused at {}", format_clock(remaining_seconds));
                }
                SessionEvent::TimerReset { remaining_seconds } => {
                    println!("\r  timer reset to {}", format_clock(remaining_seconds));
                }
                SessionEvent::TimerCompleted {
                    step_index,
                    play_sound,
                } => {
                    let bell = if play_sound { "\x07" } else { "" };
                    println!("\r{bell}  Step {} timer done. Press n when ready.", step_index + 1);
                }
                SessionEvent::SoundToggled { enabled } => {
                    println!("  sound {}", if enabled { "on" } else { "off" });
                }
                SessionEvent::Finished { .. } | SessionEvent::Exited => break,
                SessionEvent::Started { .. } | SessionEvent::StepChanged { .. } => {}
            }
        }
    })
}
