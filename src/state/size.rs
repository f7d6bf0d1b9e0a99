/// Human-readable file sizes ("0 Bytes", "1.5 KB", "2 GB")

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const BASE: u64 = 1024;

/// Format a byte count with a base-1024 unit ladder.
///
/// The value is rounded to two decimals and printed without trailing
/// zeros. Anything past the GB range stays in GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit < UNITS.len() - 1 && bytes >= divisor * BASE {
        divisor *= BASE;
        unit += 1;
    }

    let value = ((bytes as f64 / divisor as f64) * 100.0).round() / 100.0;
    format!("{} {}", value, UNITS[unit])
}
