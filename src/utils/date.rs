//! Date formatting for feeds.
//!
//! Publish dates are stored in UTC and shown in the site timezone, which is a
//! fixed offset (`UTC`, `+03:00`, `-0530`).
//!
//! # Examples
//!
//! ```ignore
//! let tz = parse_timezone("+03:00").unwrap();
//! assert_eq!(to_rfc822(dt, tz), "Mon, 15 Jan 2024 13:30:45 +0300");
//! ```

use chrono::{DateTime, FixedOffset, Utc};

/// Parse a site timezone: `UTC`, `Z`, `GMT`, or a `±HH:MM` / `±HHMM` offset.
pub fn parse_timezone(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if matches!(s.to_ascii_uppercase().as_str(), "UTC" | "Z" | "GMT") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Format as RFC 822 in the given timezone, with a numeric offset.
///
/// Returns: `Mon, 15 Jan 2024 13:30:45 +0300`
pub fn to_rfc822(dt: DateTime<Utc>, tz: FixedOffset) -> String {
    dt.with_timezone(&tz)
        .format("%a, %d %b %Y %H:%M:%S %z")
        .to_string()
}
