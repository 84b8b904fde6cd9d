use clap::Subcommand;
use smolhabits_core::input::parse_clock;
use smolhabits_core::{Config, Event};
use tracing::info;

use super::CommandResult;
use crate::app::{resolve_habit, App};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Remind at the next occurrence of a wall-clock time
    Daily {
        /// Habit ID or a custom habit name
        #[arg(long)]
        habit: String,
        /// Time of day as HH:MM (defaults to reminder.hour/reminder.minute)
        #[arg(long)]
        at: Option<String>,
    },
    /// Remind after a number of minutes
    Quick {
        /// Habit ID or a custom habit name; omitted uses a generic name
        #[arg(long)]
        habit: Option<String>,
        /// Minutes from now (defaults to reminder.quick_delay_minutes)
        #[arg(long = "in")]
        minutes: Option<String>,
    },
}

pub fn run(action: RemindAction) -> CommandResult {
    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(remind(action, config))
}

async fn remind(action: RemindAction, config: Config) -> CommandResult {
    let mut app = App::new(config);

    let scheduled = match action {
        RemindAction::Daily { habit, at } => {
            app.session.select_habit(resolve_habit(&habit));
            let clock = match at {
                Some(at) => parse_clock(&at),
                None => Some((app.config.reminder.hour, app.config.reminder.minute)),
            };
            clock.and_then(|(hour, minute)| {
                app.session
                    .set_reminder_time(&hour.to_string(), &minute.to_string())
            })
        }
        RemindAction::Quick { habit, minutes } => {
            if let Some(habit) = habit {
                app.session.select_habit(resolve_habit(&habit));
            }
            let minutes =
                minutes.unwrap_or_else(|| app.config.reminder.quick_delay_minutes.to_string());
            app.session.quick_reminder(&minutes)
        }
    };

    let Some(scheduled) = scheduled else {
        println!("invalid time, request ignored");
        return Ok(());
    };
    println!("{}", scheduled.describe());

    loop {
        tokio::select! {
            event = app.events.recv() => match event {
                Some(event @ Event::ReminderFired { .. }) => {
                    println!("{}", event.describe());
                    return Ok(());
                }
                Some(_) => {}
                None => return Ok(()),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted before the reminder fired");
                println!();
                return Ok(());
            }
        }
    }
}
