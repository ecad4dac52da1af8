//! Formatting utilities used for CLI and export outputs.

use crate::utils::colors::{GREY, RESET, color_for_rate};
use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

fn ansi_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"))
}

pub fn strip_ansi(s: &str) -> String {
    ansi_regex().replace_all(s, "").into_owned()
}

/// Display width on a terminal, ignoring ANSI escapes.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// 0.857 → "86%"
pub fn percent(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

/// Colored percentage, or a grey "n/a" when there was nothing due.
pub fn rate_or_na(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{}{}{}", color_for_rate(r), percent(r), RESET),
        None => format!("{GREY}n/a{RESET}"),
    }
}
