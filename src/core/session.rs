//! Per-invocation UI state for the habit editor.
//!
//! Handlers receive the session explicitly; nothing is kept in globals.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HabitSession {
    /// Habit being edited; `None` means the form creates a new habit.
    pub edit_id: Option<i64>,
    /// Set once the user confirmed deletion of `edit_id`.
    pub confirm_delete: bool,
}

impl HabitSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(id: i64) -> Self {
        Self {
            edit_id: Some(id),
            confirm_delete: false,
        }
    }

    /// Arms deletion. Ignored when no habit is being edited.
    pub fn request_delete(&mut self) {
        self.confirm_delete = self.edit_id.is_some();
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn reset(&mut self) {
        self.edit_id = None;
        self.confirm_delete = false;
    }
}
