pub mod config;
pub mod habit;
pub mod pomodoro;
pub mod remind;
pub mod session;

/// Every subcommand reports failures through the core error type.
pub type CommandResult = smolhabits_core::Result<()>;
