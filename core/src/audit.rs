//! Operational audit log: line format, filter, and the console + file sink.
//!
//! The binary installs the logger; this module holds the pieces it is built from.
//! Records from this crate are never filtered below `info`, so bookings,
//! loads and initializations always reach the audit file.

use crate::ticket::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use log::{Level, LevelFilter};
use std::io::{self, Write};

/// Log target of every record emitted by this crate.
pub const CORE_TARGET: &str = "cinema_core";

/// `<timestamp> - <LEVEL> - <message>`
pub fn format_line(at: NaiveDateTime, level: Level, message: &str) -> String {
    format!("{} - {level} - {message}", at.format(TIMESTAMP_FORMAT))
}

/// Turn a `RUST_LOG` value into the filter the audit logger uses.
///
/// Directives for other targets pass through untouched. Directives aimed at
/// this crate may raise its level but never lower it below `info`.
pub fn audit_filter(rust_log: Option<&str>) -> String {
    let Some(requested) = rust_log.map(str::trim).filter(|s| !s.is_empty()) else {
        return "info".to_string();
    };
    let (directives, regex) = match requested.split_once('/') {
        Some((directives, regex)) => (directives, Some(regex)),
        None => (requested, None),
    };

    let mut core_level = LevelFilter::Info;
    let mut kept = Vec::new();
    for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match parse_directive(directive) {
            (None, level) => {
                core_level = core_level.max(level);
                kept.push(directive.to_string());
            }
            (Some(target), level) if is_core_target(target) => {
                core_level = core_level.max(level);
            }
            _ => kept.push(directive.to_string()),
        }
    }
    kept.push(format!("{CORE_TARGET}={}", core_level.to_string().to_lowercase()));

    let mut filter = kept.join(",");
    if let Some(regex) = regex {
        filter.push('/');
        filter.push_str(regex);
    }
    filter
}

fn parse_directive(directive: &str) -> (Option<&str>, LevelFilter) {
    match directive.split_once('=') {
        Some((target, level)) => (
            Some(target.trim()),
            level.trim().parse().unwrap_or(LevelFilter::Off),
        ),
        None => match directive.parse::<LevelFilter>() {
            Ok(level) => (None, level),
            // A bare module name enables everything for that module.
            Err(_) => (Some(directive), LevelFilter::Trace),
        },
    }
}

fn is_core_target(target: &str) -> bool {
    target == CORE_TARGET
        || target
            .strip_prefix(CORE_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Writes every byte to both the console and the audit file.
pub struct Tee<C, F> {
    console: C,
    file:    F,
}

impl<C: Write, F: Write> Tee<C, F> {
    pub fn new(console: C, file: F) -> Self {
        Self { console, file }
    }

    pub fn into_inner(self) -> (C, F) {
        (self.console, self.file)
    }
}

impl<C: Write, F: Write> Write for Tee<C, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}
