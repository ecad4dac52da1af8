pub mod backup;
pub mod calculator;
pub mod checkin;
pub mod dashboard;
pub mod habit;
pub mod log;
pub mod schedule;
pub mod session;
