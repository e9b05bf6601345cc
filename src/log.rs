use std::fmt::Display;
use std::sync::Mutex;

use chrono::{DateTime, Datelike, Local, Timelike};
use lazy_static::lazy_static;
use serde_derive::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Off,
    Warn,
    #[default]
    Info,
    Debug,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Off => write!(f, "OFF"),
            Level::Warn => write!(f, "WARN"),
            Level::Info => write!(f, "INFO"),
            Level::Debug => write!(f, "DEBUG"),
        }
    }
}

lazy_static! {
    static ref THRESHOLD: Mutex<Level> = Mutex::new(Level::default());
}

pub fn set_level(level: Level) {
    if let Ok(mut threshold) = THRESHOLD.lock() {
        *threshold = level;
    }
}

fn passes(threshold: Level, level: Level) -> bool {
    level != Level::Off && level <= threshold
}

fn format_line(time: DateTime<Local>, level: Level, message: &str) -> String {
    let human_readable = format!(
        "{:02}.{:02} {:02}:{:02}:{:02}",
        time.day(),
        time.month(),
        time.hour(),
        time.minute(),
        time.second()
    );

    format!("[{human_readable}] {level} {message}")
}

pub fn write_message(level: Level, message: &str) {
    let threshold = THRESHOLD.lock().map(|t| *t).unwrap_or_default();

    if passes(threshold, level) {
        eprintln!("{}", format_line(Local::now(), level, message));
    }
}

macro_rules! log{
    ($level:ident, $($e:expr),+) => {
        crate::log::write_message(crate::log::Level::$level, &format!($($e),+))
    }
}

pub(crate) use log;

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn threshold_filters_by_verbosity() {
        assert!(passes(Level::Info, Level::Warn));
        assert!(passes(Level::Info, Level::Info));
        assert!(!passes(Level::Info, Level::Debug));
        assert!(!passes(Level::Off, Level::Warn));
        assert!(!passes(Level::Debug, Level::Off));
    }

    #[test]
    fn line_carries_timestamp_and_level() {
        let time = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();

        assert_eq!(
            format_line(time, Level::Warn, "grammar `g` unavailable"),
            "[07.03 09:05:01] WARN grammar `g` unavailable"
        );
    }
}
