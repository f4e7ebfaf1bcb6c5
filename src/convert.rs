//! # Date and Number Conversions
//!
//! Pure conversion helpers shared by the header codec and the record layout:
//!
//! - short date: `YYYYMMDD` text to the 3-byte `(year - 1900, month, day)`
//!   form used by the header modification date and 3-byte date slots
//! - Julian day pair: `{days since the Julian epoch, milliseconds since
//!   midnight}` to and from Unix seconds
//! - currency: little-endian u64 scaled by 10^4 to and from a decimal string
//!
//! The only clock access in the crate lives here: `today` formats the current
//! local date as `YYYYMMDD`, which callers then feed through `date_to_short`.

use chrono::Datelike;
use eyre::{ensure, Result};

/// Julian day number of the Unix epoch (1970-01-01).
pub const JULIAN_UNIX_EPOCH: i64 = 2_440_588;

const SECONDS_PER_DAY: i64 = 86_400;

/// Scale factor between a currency value and its integer storage form.
pub const CURRENCY_SCALE: u64 = 10_000;

/// Formats the current local date as `YYYYMMDD`.
pub fn today() -> String {
    let now = chrono::Local::now();
    format!("{:04}{:02}{:02}", now.year(), now.month(), now.day())
}

/// Converts a `YYYYMMDD` string to the 3-byte short-date form.
pub fn date_to_short(date: &str) -> Result<[u8; 3]> {
    ensure!(
        date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()),
        "invalid date '{}': expected YYYYMMDD",
        date
    );

    let year: u16 = date[..4].parse()?;
    let month: u8 = date[4..6].parse()?;
    let day: u8 = date[6..8].parse()?;

    ensure!(
        (1900..=2155).contains(&year),
        "year {} out of range for short-date form",
        year
    );
    ensure!((1..=12).contains(&month), "month {} out of range", month);
    ensure!((1..=31).contains(&day), "day {} out of range", day);

    Ok([(year - 1900) as u8, month, day])
}

/// Converts a 3-byte short date back to a `YYYYMMDD` string.
pub fn short_to_date(short: [u8; 3]) -> String {
    format!(
        "{:04}{:02}{:02}",
        1900 + short[0] as u16,
        short[1],
        short[2]
    )
}

/// Converts Unix seconds to a Julian day pair.
pub fn unix_to_julian(seconds: i64) -> (i32, u32) {
    let days = seconds.div_euclid(SECONDS_PER_DAY) + JULIAN_UNIX_EPOCH;
    let millis = seconds.rem_euclid(SECONDS_PER_DAY) * 1000;
    (days as i32, millis as u32)
}

/// Converts a Julian day pair back to Unix seconds. Sub-second precision in
/// the millisecond half is truncated.
pub fn julian_to_unix(days: i32, millis: u32) -> i64 {
    (days as i64 - JULIAN_UNIX_EPOCH) * SECONDS_PER_DAY + (millis / 1000) as i64
}

/// Renders a stored currency integer as a decimal string with four places.
pub fn currency_to_string(raw: u64) -> String {
    format!("{}.{:04}", raw / CURRENCY_SCALE, raw % CURRENCY_SCALE)
}

/// Parses a decimal string into the scaled integer storage form.
pub fn string_to_currency(text: &str) -> Result<u64> {
    let text = text.trim();
    ensure!(!text.is_empty(), "empty currency value");

    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    ensure!(
        frac.len() <= 4,
        "currency value '{}' has more than four decimal places",
        text
    );
    ensure!(
        whole.bytes().all(|b| b.is_ascii_digit()) && frac.bytes().all(|b| b.is_ascii_digit()),
        "invalid currency value '{}'",
        text
    );

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse()? };
    let mut frac_scaled: u64 = if frac.is_empty() { 0 } else { frac.parse()? };
    for _ in frac.len()..4 {
        frac_scaled *= 10;
    }

    whole
        .checked_mul(CURRENCY_SCALE)
        .and_then(|w| w.checked_add(frac_scaled))
        .ok_or_else(|| eyre::eyre!("currency value '{}' overflows 64 bits", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_date_round_trip() {
        let short = date_to_short("19700101").unwrap();
        assert_eq!(short, [70, 1, 1]);
        assert_eq!(short_to_date(short), "19700101");

        let short = date_to_short("20251231").unwrap();
        assert_eq!(short, [125, 12, 31]);
        assert_eq!(short_to_date(short), "20251231");
    }

    #[test]
    fn short_date_rejects_malformed_input() {
        assert!(date_to_short("1970-1-1").is_err());
        assert!(date_to_short("197001").is_err());
        assert!(date_to_short("18991231").is_err());
        assert!(date_to_short("19701301").is_err());
    }

    #[test]
    fn julian_epoch_is_anchored() {
        assert_eq!(unix_to_julian(0), (JULIAN_UNIX_EPOCH as i32, 0));
        assert_eq!(julian_to_unix(JULIAN_UNIX_EPOCH as i32, 0), 0);
    }

    #[test]
    fn julian_round_trip_with_time_of_day() {
        // 2000-01-01 12:00:00 UTC
        let secs = 946_728_000;
        let (days, millis) = unix_to_julian(secs);
        assert_eq!(days, 2_451_545);
        assert_eq!(millis, 43_200_000);
        assert_eq!(julian_to_unix(days, millis), secs);
    }

    #[test]
    fn julian_handles_pre_epoch_seconds() {
        let (days, millis) = unix_to_julian(-1);
        assert_eq!(days, JULIAN_UNIX_EPOCH as i32 - 1);
        assert_eq!(millis, 86_399_000);
    }

    #[test]
    fn currency_round_trip() {
        assert_eq!(string_to_currency("123.4567").unwrap(), 1_234_567);
        assert_eq!(currency_to_string(1_234_567), "123.4567");
        assert_eq!(string_to_currency("5").unwrap(), 50_000);
        assert_eq!(currency_to_string(50_000), "5.0000");
        assert_eq!(string_to_currency("0.0001").unwrap(), 1);
        assert_eq!(string_to_currency("0.42").unwrap(), 4_200);
    }

    #[test]
    fn currency_rejects_bad_input() {
        assert!(string_to_currency("").is_err());
        assert!(string_to_currency("1.23456").is_err());
        assert!(string_to_currency("12a.3").is_err());
    }

    #[test]
    fn today_is_well_formed() {
        let t = today();
        assert_eq!(t.len(), 8);
        assert!(t.bytes().all(|b| b.is_ascii_digit()));
    }
}
