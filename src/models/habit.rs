use super::schedule::Schedule;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,            // ⇔ habits.name (UNIQUE)
    pub description: String,     // ⇔ habits.description (TEXT, default '')
    pub schedule: Schedule,      // ⇔ habits.schedule_type + habits.custom_days
    pub created_at: String,      // ⇔ habits.created_at (TEXT, ISO8601)
}

impl Habit {
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.schedule.is_due_on(day)
    }
}

/// User-entered habit fields, validated before insert/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitForm {
    pub name: String,
    pub description: String,
    pub schedule: Schedule,
}

impl HabitForm {
    pub fn new(name: &str, description: &str, schedule: Schedule) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            schedule,
        }
    }

    /// Start an edit form from the stored habit.
    pub fn from_habit(habit: &Habit) -> Self {
        Self {
            name: habit.name.clone(),
            description: habit.description.clone(),
            schedule: habit.schedule.clone(),
        }
    }
}
