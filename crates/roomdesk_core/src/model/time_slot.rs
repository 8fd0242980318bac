//! Time-of-day slot labels.

use crate::model::validation::ValidationError;
use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static SLOT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid slot regex"));

/// A validated 24-hour `HH:MM` slot start.
///
/// The label form is canonical: parsing and displaying a slot round-trips
/// byte for byte, which the identifier derivation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Parses a slot label, tolerating surrounding whitespace only.
    pub fn parse(label: &str) -> Result<Self, ValidationError> {
        let trimmed = label.trim();
        if !SLOT_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidTimeSlot(label.to_string()));
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self)
            .map_err(|_| ValidationError::InvalidTimeSlot(label.to_string()))
    }

    pub fn start(&self) -> NaiveTime {
        self.0
    }

    /// `HHMM` digits used inside reservation identifiers.
    pub fn digits(&self) -> String {
        format!("{:02}{:02}", self.0.hour(), self.0.minute())
    }

    pub fn label(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl From<TimeSlot> for String {
    fn from(value: TimeSlot) -> Self {
        value.label()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::TimeSlot;
    use crate::model::validation::ValidationError;

    #[test]
    fn parse_keeps_canonical_label() {
        let slot = TimeSlot::parse(" 18:00 ").unwrap();
        assert_eq!(slot.label(), "18:00");
        assert_eq!(slot.digits(), "1800");
        assert_eq!(slot.to_string(), "18:00");
    }

    #[test]
    fn parse_rejects_non_canonical_times() {
        for raw in ["8:00", "24:00", "18:60", "18.00", "18:00:00", ""] {
            assert_eq!(
                TimeSlot::parse(raw),
                Err(ValidationError::InvalidTimeSlot(raw.to_string()))
            );
        }
    }

    #[test]
    fn serializes_as_label() {
        let slot = TimeSlot::parse("09:30").unwrap();
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "\"09:30\"");
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }
}
