use clap::Subcommand;
use smolhabits_core::HabitTemplates;

use super::CommandResult;

#[derive(Subcommand)]
pub enum HabitAction {
    /// List the predefined habits
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one habit in detail
    Show {
        /// Habit ID (e.g. "drink_water")
        id: String,
    },
}

pub fn run(action: HabitAction) -> CommandResult {
    match action {
        HabitAction::List { json } => {
            let habits = HabitTemplates::all();
            if json {
                println!("{}", serde_json::to_string_pretty(&habits)?);
            } else {
                for habit in &habits {
                    println!(
                        "{} {:<12} {:<12} {}",
                        habit.emoji, habit.id, habit.name, habit.description
                    );
                }
            }
        }
        HabitAction::Show { id } => match HabitTemplates::find(&id) {
            Some(habit) => {
                println!("{} {}", habit.emoji, habit.name);
                println!("  id:       {}", habit.id);
                println!("  about:    {}", habit.description);
                println!("  reminder: {}", habit.reminder_label());
            }
            None => {
                eprintln!("unknown habit: {id}");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
