pub mod checkin;
pub mod habit;
pub mod schedule;
