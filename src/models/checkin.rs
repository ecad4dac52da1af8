use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Checkin {
    pub id: i64,
    pub habit_id: i64,
    pub day: NaiveDate,     // ⇔ checkins.day (TEXT "YYYY-MM-DD")
    pub done: bool,         // ⇔ checkins.done (INTEGER 0/1)
    pub note: String,       // ⇔ checkins.note (TEXT, default '')
    pub created_at: String, // ⇔ checkins.created_at (first submission only)
}

impl Checkin {
    pub fn day_str(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}
