//! Conversion between serialized date strings and calendar dates.
//!
//! Dates travel between the backend, the state store and the picker as
//! `YYYY/MM/DD` strings. Decoding always builds the date from explicit
//! numeric year/month/day components, so years below 100 keep their value:
//! `"0001/01/01"` is year 1, not 1901 or 2001.
//!
//! # Examples
//!
//! ```
//! use canopy_widgets::date_codec::{decode, encode};
//! use chrono::Datelike;
//!
//! let date = decode("0001/01/01").expect("valid date");
//! assert_eq!(date.year(), 1);
//! assert_eq!(encode(date), "0001/01/01");
//!
//! // Unpadded and ISO spellings decode to the same day
//! assert_eq!(decode("1970/1/1"), decode("1970-01-01T00:00:00"));
//! ```

use chrono::NaiveDate;
use log::warn;
use thiserror::Error;

/// Format string handed to the picker for display.
pub const PICKER_FORMAT_STRING: &str = "yyyy/MM/dd";

/// Errors produced when a serialized date cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// Not three separated components.
    #[error("expected YYYY/MM/DD, got {0:?}")]
    Shape(String),

    /// A component is empty or not a plain decimal number.
    #[error("invalid {component} {value:?} in {input:?}")]
    Component {
        /// Which component failed (`year`, `month` or `day`)
        component: &'static str,
        /// The offending text
        value: String,
        /// The whole input
        input: String,
    },

    /// The components do not name a real day (e.g. February 30).
    #[error("{year:04}/{month:02}/{day:02} is not a calendar day")]
    NotACalendarDay {
        /// Year
        year: i32,
        /// Month (1-12 expected)
        month: u32,
        /// Day of month
        day: u32,
    },
}

/// Lower bound used when a widget has no (valid) minimum: 1970/01/01.
#[must_use]
pub fn default_min_date() -> NaiveDate {
    // chrono's default date is the Unix epoch
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Decode a serialized date.
///
/// Accepts `YYYY/MM/DD`, unpadded components (`1970/1/1`) and ISO
/// `YYYY-MM-DD`, optionally followed by a `T...` time part which is
/// ignored. The result is the calendar day.
pub fn decode(serialized: &str) -> Result<NaiveDate, DateParseError> {
    let input = serialized.trim();
    let day_part = input.split_once('T').map_or(input, |(day, _time)| day);
    let separator = if day_part.contains('/') { '/' } else { '-' };

    let parts: Vec<&str> = day_part.split(separator).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(DateParseError::Shape(input.to_string()));
    };

    let year = component("year", year, input)?;
    let month = component("month", month, input)?;
    let day = component("day", day, input)?;
    let year = i32::try_from(year).map_err(|_| DateParseError::Component {
        component: "year",
        value: year.to_string(),
        input: input.to_string(),
    })?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::NotACalendarDay { year, month, day })
}

fn component(name: &'static str, value: &str, input: &str) -> Result<u32, DateParseError> {
    let invalid = || DateParseError::Component {
        component: name,
        value: value.to_string(),
        input: input.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

/// Encode a date as canonical `YYYY/MM/DD`, year padded to four digits.
#[must_use]
pub fn encode(date: NaiveDate) -> String {
    // %Y zero-pads to four digits, so year 1 is "0001"
    date.format("%Y/%m/%d").to_string()
}

/// Decode every entry, skipping (and logging) the ones that do not parse.
#[must_use]
pub fn decode_all(serialized: &[String]) -> Vec<NaiveDate> {
    serialized
        .iter()
        .filter_map(|s| match decode(s) {
            Ok(date) => Some(date),
            Err(err) => {
                warn!("dropping malformed date: {err}");
                None
            }
        })
        .collect()
}

/// Encode every date.
#[must_use]
pub fn encode_all(dates: &[NaiveDate]) -> Vec<String> {
    dates.iter().copied().map(encode).collect()
}
