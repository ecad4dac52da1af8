//! Permissive parsing helpers.
//!
//! Several inputs (custom weekday lists, the reminder time) are parsed with a
//! fallback instead of failing. [`Parsed`] carries the value to use together
//! with a flag telling whether the raw input was fully understood, so callers
//! can warn instead of silently defaulting.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub valid: bool,
}

impl<T> Parsed<T> {
    pub fn ok(value: T) -> Self {
        Self { value, valid: true }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            valid: false,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
