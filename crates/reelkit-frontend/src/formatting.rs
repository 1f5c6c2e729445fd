use std::fmt::Write;

/// IEC units for byte quantities.
const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Formats a byte count into a human-readable string using IEC units.
///
/// Scales the value by dividing by 1024 repeatedly until it falls below
/// 1024, then formats it with either exact bytes (for < 1024) or two
/// decimal places.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

/// Formats an elapsed duration in a human-readable `HH:MM:SS` or `MM:SS`
/// format.
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let mut out = String::with_capacity(8);
    if hours > 0 {
        write!(&mut out, "{:02}:{:02}:{:02}", hours, minutes, secs).unwrap();
    } else {
        write!(&mut out, "{:02}:{:02}", minutes, secs).unwrap();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_scale_through_iec_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MiB");
    }

    #[test]
    fn elapsed_omits_hours_when_short() {
        assert_eq!(format_elapsed(42.7), "00:42");
        assert_eq!(format_elapsed(61.0), "01:01");
        assert_eq!(format_elapsed(3661.0), "01:01:01");
    }
}
