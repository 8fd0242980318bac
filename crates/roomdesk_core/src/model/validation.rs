//! Input validation errors and plain-data parsers.
//!
//! Callers pass dates as `YYYY-MM-DD` strings. Anything that does not parse
//! strictly is rejected here instead of leaking a parse failure later.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date is not a real calendar day in `YYYY-MM-DD` form.
    InvalidDate(String),
    /// Slot label is not a 24-hour `HH:MM` time.
    InvalidTimeSlot(String),
    /// Slot label is well-formed but not part of the room configuration.
    UnknownTimeSlot(String),
    /// Room number is outside `1..=number_of_rooms`.
    RoomOutOfRange { room_number: u32, number_of_rooms: u32 },
    /// Room count is zero or exceeds what the identifier format can encode.
    InvalidRoomCount(u32),
    /// Configuration would leave rooms without any slot.
    EmptySlotSet,
    /// Duration offset is outside the supported hour range.
    InvalidDurationOffset(u32),
    /// Guest name is blank.
    EmptyGuestName,
    /// Identifier does not decode to a valid cell.
    InvalidReservationId(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTimeSlot(value) => {
                write!(f, "invalid time slot `{value}`; expected HH:MM")
            }
            Self::UnknownTimeSlot(value) => {
                write!(f, "time slot `{value}` is not configured")
            }
            Self::RoomOutOfRange {
                room_number,
                number_of_rooms,
            } => write!(
                f,
                "room {room_number} does not exist; valid rooms are 1..={number_of_rooms}"
            ),
            Self::InvalidRoomCount(count) => write!(
                f,
                "invalid number of rooms {count}; expected 1..={}",
                crate::model::room_config::MAX_ROOMS
            ),
            Self::EmptySlotSet => write!(f, "at least one time slot is required"),
            Self::InvalidDurationOffset(hours) => write!(
                f,
                "invalid duration offset {hours}h; expected 1..={}",
                crate::model::room_config::MAX_DURATION_OFFSET_HOURS
            ),
            Self::EmptyGuestName => write!(f, "guest name must not be empty"),
            Self::InvalidReservationId(value) => write!(f, "invalid reservation id `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if !DATE_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Formats a date the way callers pass it in.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_date, parse_date, ValidationError};

    #[test]
    fn parse_date_accepts_padded_calendar_days() {
        let date = parse_date("2024-02-29").expect("leap day should parse");
        assert_eq!(format_date(date), "2024-02-29");
        assert!(parse_date(" 2024-01-01 ").is_ok());
    }

    #[test]
    fn parse_date_rejects_unpadded_and_impossible_values() {
        for raw in ["2024-1-1", "2023-02-29", "20240101", "", "2024-13-01"] {
            assert_eq!(
                parse_date(raw),
                Err(ValidationError::InvalidDate(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }
}
