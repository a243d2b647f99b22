//! Timestamps encoded in post filenames.
//!
//! Every post filename starts with a fixed-width UTC timestamp:
//!
//! ```text
//! 2026-02-05T21:38:22Z_arpeggiator.md
//! └──────────────────┘
//!   first 20 characters
//! ```
//!
//! The prefix is used twice: verbatim as the machine-readable `datetime`
//! attribute of the post's `<time>` element, and decoded into a short
//! human-readable form (`Thu 5 Feb 2026 21:38 UTC`) for display.
//!
//! ## Invalid Dates
//!
//! This layer does not validate filenames; that is the job of
//! [`validate`](crate::validate). A prefix that does not decode yields `None`
//! from [`parse_date_from_filename`], and [`readable_from_filename`] maps it
//! to the [`INVALID_DATE`] sentinel so a build still completes and the bad
//! post shows up visibly in the output.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Number of leading filename characters that hold the timestamp.
pub const TIMESTAMP_LEN: usize = 20;

/// `chrono` format of the filename timestamp prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Rendered in place of a readable date when the prefix does not decode.
pub const INVALID_DATE: &str = "Invalid Date";

/// The timestamp prefix of `filename`, unchanged.
///
/// Names shorter than [`TIMESTAMP_LEN`] are returned whole.
pub fn datetime_iso(filename: &str) -> &str {
    filename.get(..TIMESTAMP_LEN).unwrap_or(filename)
}

/// Decode the timestamp prefix of `filename` as a UTC instant.
pub fn parse_date_from_filename(filename: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(datetime_iso(filename), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format an instant as `<Dow> <D> <Mon> <YYYY> <hh>:<mm> UTC`.
///
/// Day of month is unpadded; hour and minute are zero-padded.
pub fn to_datetime_readable(date: DateTime<Utc>) -> String {
    date.format("%a %-d %b %Y %H:%M UTC").to_string()
}

/// Readable date for a filename, or [`INVALID_DATE`].
pub fn readable_from_filename(filename: &str) -> String {
    parse_date_from_filename(filename)
        .map(to_datetime_readable)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Format an instant as a filename timestamp prefix (second precision).
pub fn to_timestamp(date: DateTime<Utc>) -> String {
    date.format(TIMESTAMP_FORMAT).to_string()
}
