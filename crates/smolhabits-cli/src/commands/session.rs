//! Interactive session over stdin.
//!
//! One line per command. Asynchronous events (fired reminders, phase changes)
//! are printed as they arrive; countdown ticks only update the status shown
//! by `status`.

use smolhabits_core::{Config, Event, HabitSession, HabitTemplates, ReminderTag, TokioTaskRunner};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::CommandResult;
use crate::app::{resolve_habit, App};

const HELP: &str = "\
commands:
  habits                 list predefined habits
  select <id|name>       pick today's habit
  done                   mark the habit completed today
  clear                  drop the current habit
  remind <hour> <min>    daily reminder at a time of day
  quick <min>            one-off reminder in <min> minutes
  cancel <daily|quick>   cancel a pending reminder
  pomodoro <work> <rest> start the work/rest countdown (minutes)
  stop                   stop the countdown
  status                 show session state
  quit                   leave";

enum Flow {
    Continue,
    Quit,
}

pub fn run() -> CommandResult {
    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(session(config))
}

async fn session(config: Config) -> CommandResult {
    let mut app = App::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_status: Option<String> = None;

    println!("smolhabits session, type 'help' for commands");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match handle_line(&mut app, &line, last_status.as_deref()) {
                    Flow::Continue => {}
                    Flow::Quit => break,
                }
            }
            Some(event) = app.events.recv() => match event {
                Event::CountdownTick { status, .. } => last_status = Some(status),
                Event::ReminderFired { .. } | Event::PhaseChanged { .. } => {
                    println!("{}", event.describe());
                }
                // Already reported when the command returned.
                _ => {}
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    app.session.stop_pomodoro();
    Ok(())
}

fn handle_line(app: &mut App, line: &str, last_status: Option<&str>) -> Flow {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Flow::Continue;
    };
    let args: Vec<&str> = words.collect();
    let arg = |i: usize| args.get(i).copied().unwrap_or("");
    let session = &mut app.session;

    let outcome = match command {
        "help" => {
            println!("{HELP}");
            return Flow::Continue;
        }
        "quit" | "exit" => return Flow::Quit,
        "habits" => {
            for habit in HabitTemplates::all() {
                println!("{} {:<12} {}", habit.emoji, habit.id, habit.name);
            }
            return Flow::Continue;
        }
        "status" => {
            print_status(session, last_status);
            return Flow::Continue;
        }
        "select" => (!args.is_empty()).then(|| session.select_habit(resolve_habit(&args.join(" ")))),
        "done" => session.complete_today(),
        "clear" => session.clear_habit(),
        "remind" => session.set_reminder_time(arg(0), arg(1)),
        "quick" => session.quick_reminder(arg(0)),
        "cancel" => match arg(0) {
            "daily" => session.cancel_reminder(ReminderTag::Daily),
            "quick" => session.cancel_reminder(ReminderTag::Quick),
            _ => None,
        },
        "pomodoro" => session.start_pomodoro(arg(0), arg(1)),
        "stop" => session.stop_pomodoro(),
        _ => {
            println!("unknown command '{command}', type 'help'");
            return Flow::Continue;
        }
    };

    match outcome {
        Some(event) => println!("{}", event.describe()),
        None => {
            debug!(line, "command had no effect");
            println!("ignored");
        }
    }
    Flow::Continue
}

fn print_status(session: &HabitSession<TokioTaskRunner>, last_status: Option<&str>) {
    match session.habit() {
        Some(habit) => {
            let done = if session.is_completed_today() {
                "done today"
            } else {
                "not done yet"
            };
            println!(
                "habit: {} ({done}, streak {}, reminder {})",
                habit.name,
                habit.current_streak,
                habit.reminder_label()
            );
        }
        None => println!("habit: none"),
    }
    for tag in ReminderTag::all() {
        let state = if session.is_reminder_pending(*tag) {
            "pending"
        } else {
            "idle"
        };
        println!("{tag}: {state}");
    }
    if session.is_pomodoro_running() {
        println!("pomodoro: {}", last_status.unwrap_or("starting"));
    } else {
        println!("pomodoro: stopped");
    }
}
