/// Format a duration in minutes to "Xh Ym" or "Ym"
pub fn format_duration_min(mins: u32) -> String {
    let hours = mins / 60;
    let rem = mins % 60;
    if hours > 0 {
        format!("{}h {}m", hours, rem)
    } else {
        format!("{}m", rem)
    }
}

/// Format a volume figure with thousands separators, trimming trailing zeros
pub fn format_volume(volume: f64) -> String {
    let whole = volume.round() as i64;
    let mut s = whole.to_string();
    let mut out = String::new();
    while s.len() > 3 {
        let tail = s.split_off(s.len() - 3);
        out = if out.is_empty() {
            tail
        } else {
            format!("{},{}", tail, out)
        };
    }
    if out.is_empty() {
        s
    } else {
        format!("{},{}", s, out)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u64, total: u64, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}
