//! Metric text with signed deltas against the previous capture.

const BYTE_UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Default byte humanizer: plain bytes below 1 KiB, one decimal above.
pub fn humanize_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < BYTE_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", BYTE_UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delta {
    None,
    Up(u64),
    Down(u64),
}

impl Delta {
    fn between(current: u64, previous: Option<u64>) -> Self {
        match previous {
            Some(previous) if current > previous => Self::Up(current - previous),
            Some(previous) if current < previous => Self::Down(previous - current),
            _ => Self::None,
        }
    }
}

/// `5`, `5 (+3)` or `2 (-3)`. No suffix when unchanged or when there is no
/// previous value.
pub fn format_count(current: u64, previous: Option<u64>) -> String {
    match Delta::between(current, previous) {
        Delta::None => current.to_string(),
        Delta::Up(delta) => format!("{current} (+{delta})"),
        Delta::Down(delta) => format!("{current} (-{delta})"),
    }
}

/// Like [`format_count`], but both the value and the delta magnitude go
/// through `humanize`, which is not sign-aware; the sign is prefixed after.
pub fn format_bytes(
    current: u64,
    previous: Option<u64>,
    humanize: impl Fn(u64) -> String,
) -> String {
    let value = humanize(current);
    match Delta::between(current, previous) {
        Delta::None => value,
        Delta::Up(delta) => format!("{value} (+{})", humanize(delta)),
        Delta::Down(delta) => format!("{value} (-{})", humanize(delta)),
    }
}
