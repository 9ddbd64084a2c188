//! Human-readable sizes and durations

use std::time::Duration;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Format bytes as `B`, `KB`, `MB` or `GB` with one decimal
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// Format a duration as `{minutes}m {seconds}s`
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_pick_the_right_unit() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * MB), "5.0 MB");
        assert_eq!(format_size(3 * GB / 2), "1.5 GB");
    }

    #[test]
    fn elapsed_is_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0m 0s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
    }
}
