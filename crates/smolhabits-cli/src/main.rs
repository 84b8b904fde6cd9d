use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "smolhabits", version, about = "One small habit a day, with reminders and a work/rest timer")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the predefined habits
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Schedule a reminder and wait for it to fire
    Remind {
        #[command(subcommand)]
        action: commands::remind::RemindAction,
    },
    /// Run the work/rest countdown until interrupted
    Pomodoro(commands::pomodoro::PomodoroArgs),
    /// Interactive session: pick a habit, mark it done, set reminders
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so stdout stays clean for status lines and JSON.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,smolhabits_core=info,smolhabits=info",
        _ => "warn,smolhabits_core=debug,smolhabits=debug",
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Remind { action } => commands::remind::run(action),
        Commands::Pomodoro(args) => commands::pomodoro::run(args),
        Commands::Session => commands::session::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
