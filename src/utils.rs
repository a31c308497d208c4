use chrono::{DateTime, Local};
use percent_encoding::percent_decode_str;
use std::fs::OpenOptions;
use std::io::Write;

pub const LOG_FILE: &str = "ong-portal.log";

pub fn log_msg(level: &str, msg: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        let now: DateTime<Local> = Local::now();
        let msg = msg.replace('"', "\\\"");
        let _ = writeln!(
            file,
            "time=\"{time}\" level={level} msg=\"{msg}\"",
            time = now.format("%Y-%m-%dT%H:%M:%S%z"),
        );
    }
}

pub fn reset_log() {
    let _ = std::fs::write(LOG_FILE, "");
}

/// Human-readable form of a path or URL for the status bar.
pub fn decode_url(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().to_string()
}
