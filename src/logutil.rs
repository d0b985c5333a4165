//! Logging setup and helpers.
//!
//! Descriptions and rejection strings are free text that may span lines or
//! carry control characters; [`escape_log`] keeps each record on one line.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::sync::{Arc, Mutex};

use crate::config::LoggingConfig;

const MAX_PREVIEW: usize = 300;

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///
/// Strings longer than 300 characters are cut with an ellipsis.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn timestamp() -> chrono::format::DelayedFormat<chrono::format::StrftimeItems<'static>> {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
}

/// Initialize `env_logger`.
///
/// CLI verbosity wins over the configured level (`-v` debug, `-vv` trace).
/// With a log file configured, lines go to the file and are echoed to the
/// console only when stdout is a terminal.
pub fn init_logging(config: Option<&LoggingConfig>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 => config
            .map(LoggingConfig::level_filter)
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config
        .and_then(|cfg| cfg.file.as_ref())
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

    match log_file {
        Some(file) => {
            let file = Arc::new(Mutex::new(file));
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let line = format!("{} [{}] {}", timestamp(), record.level(), record.args());
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                writeln!(fmt, "{} [{}] {}", timestamp(), record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
