use super::Habit;

/// The predefined habits a user can pick from.
pub struct HabitTemplates;

impl HabitTemplates {
    pub fn drink_water() -> Habit {
        Habit::new(
            "drink_water",
            "Drink Water",
            "💧",
            "Stay hydrated with a glass of water",
        )
    }

    pub fn stretch() -> Habit {
        Habit::new(
            "stretch",
            "Stretch",
            "🤸",
            "Take a moment to stretch your body",
        )
    }

    pub fn meditate() -> Habit {
        Habit::new(
            "meditate",
            "Meditate",
            "🧘",
            "Find peace with a few minutes of meditation",
        )
    }

    pub fn all() -> Vec<Habit> {
        vec![Self::drink_water(), Self::stretch(), Self::meditate()]
    }

    /// Case-insensitive lookup by id. Dashes are accepted for underscores.
    pub fn find(id: &str) -> Option<Habit> {
        let wanted = id.trim().to_ascii_lowercase().replace('-', "_");
        Self::all().into_iter().find(|h| h.id == wanted)
    }
}
