//! Contract between the date input and the calendar picker that draws it.
//!
//! The calendar control itself belongs to the host (a web component, a
//! native popover, a terminal calendar). The date input hands it a
//! [`PickerProps`] on every render and receives a [`DatePickerChange`]
//! back whenever the user picks something.

use crate::date_codec::PICKER_FORMAT_STRING;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the picker needs to draw the control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerProps {
    /// Selected dates, in order (empty, one date, or a start/end pair)
    pub value: Vec<NaiveDate>,
    /// Whether the control accepts input
    pub disabled: bool,
    /// Earliest selectable day (inclusive)
    pub min_date: NaiveDate,
    /// Latest selectable day (inclusive), unbounded when `None`
    pub max_date: Option<NaiveDate>,
    /// Display format, always [`PICKER_FORMAT_STRING`]
    pub format_string: String,
    /// Whether the picker selects a start/end range
    pub range: bool,
}

impl PickerProps {
    /// Props for an enabled single-date picker with the given bounds.
    #[must_use]
    pub fn new(min_date: NaiveDate, max_date: Option<NaiveDate>) -> Self {
        Self {
            value: Vec::new(),
            disabled: false,
            min_date,
            max_date,
            format_string: PICKER_FORMAT_STRING.to_string(),
            range: false,
        }
    }
}

/// What the picker reports after a user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickedDate {
    /// A single day was chosen
    Single(NaiveDate),
    /// A range (possibly still half-open) was chosen
    Range(Vec<NaiveDate>),
    /// The selection was cleared
    Cleared,
}

impl PickedDate {
    /// The picked dates as an ordered list.
    #[must_use]
    pub fn into_dates(self) -> Vec<NaiveDate> {
        match self {
            Self::Single(date) => vec![date],
            Self::Range(dates) => dates,
            Self::Cleared => Vec::new(),
        }
    }
}

/// Change event emitted by the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePickerChange {
    /// The new selection
    pub date: PickedDate,
}

impl DatePickerChange {
    /// A single-day selection.
    #[must_use]
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            date: PickedDate::Single(date),
        }
    }

    /// A range selection.
    #[must_use]
    pub fn range(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            date: PickedDate::Range(dates.into_iter().collect()),
        }
    }

    /// A cleared selection.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            date: PickedDate::Cleared,
        }
    }
}

/// A calendar control the host provides.
pub trait DatePicker {
    /// Draw (or update) the control with the given props.
    fn render(&mut self, props: &PickerProps);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_props_new_defaults() {
        let props = PickerProps::new(ymd(1970, 1, 1), None);
        assert!(props.value.is_empty());
        assert!(!props.disabled);
        assert!(!props.range);
        assert_eq!(props.format_string, "yyyy/MM/dd");
    }

    #[test]
    fn test_picked_date_into_dates() {
        assert_eq!(
            PickedDate::Single(ymd(2020, 2, 6)).into_dates(),
            vec![ymd(2020, 2, 6)]
        );
        assert_eq!(
            DatePickerChange::range([ymd(2020, 1, 1), ymd(2020, 1, 5)])
                .date
                .into_dates(),
            vec![ymd(2020, 1, 1), ymd(2020, 1, 5)]
        );
        assert!(DatePickerChange::cleared().date.into_dates().is_empty());
    }

    #[test]
    fn test_props_serialize_dates_as_iso() {
        let mut props = PickerProps::new(ymd(1970, 1, 1), Some(ymd(2030, 2, 6)));
        props.value = vec![ymd(2020, 2, 6)];
        let json = serde_json::to_value(&props).expect("serialize");
        assert_eq!(json["value"][0], "2020-02-06");
        assert_eq!(json["min_date"], "1970-01-01");
        assert_eq!(json["max_date"], "2030-02-06");
        assert_eq!(json["format_string"], "yyyy/MM/dd");
    }
}
