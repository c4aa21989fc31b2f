//! Formatting helpers for the TUI

/// Formats a byte count with binary units, e.g. `1.5 MB`
pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if size < 1024 {
        return format!("{} B", size);
    }

    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

/// Fraction of items decided so far, in `[0.0, 1.0]`
pub fn calculate_progress(decided: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (decided as f64 / total as f64).min(1.0)
}
