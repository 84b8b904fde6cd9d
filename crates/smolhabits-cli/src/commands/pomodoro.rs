use std::io::Write;

use clap::Args;
use smolhabits_core::{Config, Event};

use super::CommandResult;
use crate::app::App;

#[derive(Args)]
pub struct PomodoroArgs {
    /// Work phase length in minutes (defaults to pomodoro.work_minutes)
    #[arg(long)]
    work: Option<String>,
    /// Rest phase length in minutes (defaults to pomodoro.rest_minutes)
    #[arg(long)]
    rest: Option<String>,
    /// Print every event as a JSON line instead of a status line
    #[arg(long)]
    json: bool,
}

pub fn run(args: PomodoroArgs) -> CommandResult {
    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(pomodoro(args, config))
}

async fn pomodoro(args: PomodoroArgs, config: Config) -> CommandResult {
    let mut app = App::new(config);
    let work = args
        .work
        .unwrap_or_else(|| app.config.pomodoro.work_minutes.to_string());
    let rest = args
        .rest
        .unwrap_or_else(|| app.config.pomodoro.rest_minutes.to_string());

    if app.session.start_pomodoro(&work, &rest).is_none() {
        println!("invalid duration, request ignored");
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            event = app.events.recv() => {
                let Some(event) = event else { break };
                if args.json {
                    println!("{}", serde_json::to_string(&event)?);
                    continue;
                }
                match &event {
                    Event::CountdownTick { status, .. } => {
                        // Rewrite the status line in place.
                        write!(stdout, "\r{status}")?;
                        stdout.flush()?;
                    }
                    Event::CountdownStarted { .. } => println!("{}", event.describe()),
                    Event::PhaseChanged { .. } => println!("\n{}", event.describe()),
                    _ => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if let Some(stopped) = app.session.stop_pomodoro() {
                    if args.json {
                        println!("{}", serde_json::to_string(&stopped)?);
                    } else {
                        println!("\n{}", stopped.describe());
                    }
                }
                break;
            }
        }
    }
    Ok(())
}
