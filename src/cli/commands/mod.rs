pub mod backup;
pub mod checkin;
pub mod config;
pub mod db;
pub mod export;
pub mod habit;
pub mod init;
pub mod log;
pub mod month;
pub mod settings;
pub mod stats;
pub mod today;
