//! Display helpers for table output.

/// Seconds as a compact human duration.
pub fn duration(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Dollar amounts; thousands collapse to one decimal with a K suffix.
pub fn money(amount: f64) -> String {
    if amount >= 1000.0 {
        format!("${:.1}K", amount / 1000.0)
    } else {
        format!("${amount:.0}")
    }
}
