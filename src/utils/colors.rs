/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Rate color:
/// \>= 80% → green
/// \>= 50% → yellow
/// below → red
pub fn color_for_rate(rate: f64) -> &'static str {
    if rate >= 0.8 {
        GREEN
    } else if rate >= 0.5 {
        YELLOW
    } else {
        RED
    }
}

/// Colored check-in marker: done, missed, or nothing recorded.
pub fn colorize_done(done: Option<bool>) -> String {
    match done {
        Some(true) => format!("{GREEN}✔{RESET}"),
        Some(false) => format!("{RED}✘{RESET}"),
        None => format!("{GREY}·{RESET}"),
    }
}
