use crate::models::checkin::Checkin;
use crate::models::habit::Habit;
use serde::Serialize;

/// Flat check-in row, joined with the habit name.
#[derive(Serialize, Clone, Debug)]
pub struct CheckinExport {
    pub habit_id: i64,
    pub habit: String,
    pub day: String,
    pub done: bool,
    pub note: String,
    pub created_at: String,
}

impl CheckinExport {
    pub fn from_checkin(c: &Checkin, habit_name: &str) -> Self {
        Self {
            habit_id: c.habit_id,
            habit: habit_name.to_string(),
            day: c.day_str(),
            done: c.done,
            note: c.note.clone(),
            created_at: c.created_at.clone(),
        }
    }
}

/// Flat habit row with the schedule in its storage form.
#[derive(Serialize, Clone, Debug)]
pub struct HabitExport {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub schedule_type: String,
    pub custom_days: String,
    pub created_at: String,
}

impl From<&Habit> for HabitExport {
    fn from(h: &Habit) -> Self {
        Self {
            id: h.id,
            name: h.name.clone(),
            description: h.description.clone(),
            schedule_type: h.schedule.kind_str().to_string(),
            custom_days: h.schedule.custom_days_str(),
            created_at: h.created_at.clone(),
        }
    }
}
