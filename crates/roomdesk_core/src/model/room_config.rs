//! Room and slot layout.
//!
//! # Responsibility
//! - Describe how many rooms exist and which slots each room offers.
//! - Compute slot start/end timestamps from the duration offset.
//!
//! # Invariants
//! - Every room shares the same ordered slot list.
//! - `number_of_rooms` is within `1..=MAX_ROOMS` and the slot list is
//!   non-empty, duplicate-free and in caller order.

use crate::model::reservation::CellKey;
use crate::model::time_slot::TimeSlot;
use crate::model::validation::ValidationError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Identifiers encode the room as two digits.
pub const MAX_ROOMS: u32 = 99;
pub const MAX_DURATION_OFFSET_HOURS: u32 = 24;

pub const DEFAULT_NUMBER_OF_ROOMS: u32 = 4;
pub const DEFAULT_TIME_SLOTS: [&str; 2] = ["18:00", "20:00"];
pub const DEFAULT_DURATION_OFFSET_HOURS: u32 = 2;

/// Display name for a room number.
pub fn room_name(room_number: u32) -> String {
    format!("Room {room_number}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub number: u32,
    pub name: String,
}

/// Validated room/slot configuration threaded through every scheduling call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomConfig {
    number_of_rooms: u32,
    time_slots: Vec<TimeSlot>,
    duration_offset_hours: u32,
}

impl RoomConfig {
    /// Builds a configuration from raw slot labels.
    ///
    /// Labels are trimmed and must be `HH:MM`. Repeated labels keep their
    /// first position and are otherwise dropped.
    pub fn new<S: AsRef<str>>(
        number_of_rooms: u32,
        slot_labels: &[S],
        duration_offset_hours: u32,
    ) -> Result<Self, ValidationError> {
        let time_slots = slot_labels
            .iter()
            .map(|label| TimeSlot::parse(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slots(number_of_rooms, time_slots, duration_offset_hours)
    }

    pub fn from_slots(
        number_of_rooms: u32,
        time_slots: Vec<TimeSlot>,
        duration_offset_hours: u32,
    ) -> Result<Self, ValidationError> {
        if number_of_rooms == 0 || number_of_rooms > MAX_ROOMS {
            return Err(ValidationError::InvalidRoomCount(number_of_rooms));
        }
        if duration_offset_hours == 0 || duration_offset_hours > MAX_DURATION_OFFSET_HOURS {
            return Err(ValidationError::InvalidDurationOffset(duration_offset_hours));
        }

        let mut unique = Vec::with_capacity(time_slots.len());
        for slot in time_slots {
            if !unique.contains(&slot) {
                unique.push(slot);
            }
        }
        if unique.is_empty() {
            return Err(ValidationError::EmptySlotSet);
        }

        Ok(Self {
            number_of_rooms,
            time_slots: unique,
            duration_offset_hours,
        })
    }

    /// Rebuilds the layout uniformly, keeping the current duration offset.
    pub fn with_layout<S: AsRef<str>>(
        &self,
        number_of_rooms: u32,
        slot_labels: &[S],
    ) -> Result<Self, ValidationError> {
        Self::new(number_of_rooms, slot_labels, self.duration_offset_hours)
    }

    pub fn number_of_rooms(&self) -> u32 {
        self.number_of_rooms
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn slot_labels(&self) -> Vec<String> {
        self.time_slots.iter().map(TimeSlot::label).collect()
    }

    pub fn duration_offset_hours(&self) -> u32 {
        self.duration_offset_hours
    }

    pub fn duration_offset(&self) -> Duration {
        Duration::hours(i64::from(self.duration_offset_hours))
    }

    /// Rooms in ascending number order.
    pub fn rooms(&self) -> Vec<Room> {
        (1..=self.number_of_rooms)
            .map(|number| Room {
                number,
                name: room_name(number),
            })
            .collect()
    }

    /// Total number of bookable cells per date.
    pub fn cell_count(&self) -> usize {
        self.number_of_rooms as usize * self.time_slots.len()
    }

    pub fn contains_room(&self, room_number: u32) -> bool {
        (1..=self.number_of_rooms).contains(&room_number)
    }

    pub fn contains_slot(&self, slot: &TimeSlot) -> bool {
        self.time_slots.contains(slot)
    }

    /// Checks that a cell exists in this layout.
    pub fn validate_cell(&self, cell: &CellKey) -> Result<(), ValidationError> {
        if !self.contains_room(cell.room_number) {
            return Err(ValidationError::RoomOutOfRange {
                room_number: cell.room_number,
                number_of_rooms: self.number_of_rooms,
            });
        }
        if !self.contains_slot(&cell.slot) {
            return Err(ValidationError::UnknownTimeSlot(cell.slot.label()));
        }
        Ok(())
    }

    /// Start and end timestamps of a slot on a date.
    ///
    /// The end may fall on the next day for late slots.
    pub fn slot_window(&self, date: NaiveDate, slot: &TimeSlot) -> (NaiveDateTime, NaiveDateTime) {
        let start = date.and_time(slot.start());
        (start, start + self.duration_offset())
    }

    /// Wall-clock end time of a slot, wrapping past midnight.
    pub fn slot_end_time(&self, slot: &TimeSlot) -> NaiveTime {
        slot.start() + self.duration_offset()
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_NUMBER_OF_ROOMS,
            &DEFAULT_TIME_SLOTS,
            DEFAULT_DURATION_OFFSET_HOURS,
        )
        .expect("default room config is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::{RoomConfig, MAX_ROOMS};
    use crate::model::reservation::CellKey;
    use crate::model::time_slot::TimeSlot;
    use crate::model::validation::{parse_date, ValidationError};

    #[test]
    fn default_matches_startup_settings() {
        let config = RoomConfig::default();
        assert_eq!(config.number_of_rooms(), 4);
        assert_eq!(config.slot_labels(), vec!["18:00", "20:00"]);
        assert_eq!(config.duration_offset_hours(), 2);
        assert_eq!(config.cell_count(), 8);
    }

    #[test]
    fn new_trims_and_deduplicates_in_order() {
        let config = RoomConfig::new(2, &[" 20:00", "18:00 ", "20:00"], 2).unwrap();
        assert_eq!(config.slot_labels(), vec!["20:00", "18:00"]);
    }

    #[test]
    fn new_rejects_invalid_layouts() {
        let no_slots: [&str; 0] = [];
        assert_eq!(
            RoomConfig::new(0, &["18:00"], 2),
            Err(ValidationError::InvalidRoomCount(0))
        );
        assert_eq!(
            RoomConfig::new(MAX_ROOMS + 1, &["18:00"], 2),
            Err(ValidationError::InvalidRoomCount(MAX_ROOMS + 1))
        );
        assert_eq!(
            RoomConfig::new(1, &no_slots, 2),
            Err(ValidationError::EmptySlotSet)
        );
        assert_eq!(
            RoomConfig::new(1, &["6pm"], 2),
            Err(ValidationError::InvalidTimeSlot("6pm".to_string()))
        );
        assert_eq!(
            RoomConfig::new(1, &["18:00"], 0),
            Err(ValidationError::InvalidDurationOffset(0))
        );
    }

    #[test]
    fn with_layout_keeps_duration_and_replaces_slots() {
        let config = RoomConfig::new(4, &["18:00"], 3).unwrap();
        let updated = config.with_layout(2, &["09:00", "10:00"]).unwrap();
        assert_eq!(updated.number_of_rooms(), 2);
        assert_eq!(updated.duration_offset_hours(), 3);
        assert_eq!(updated.cell_count(), 4);
    }

    #[test]
    fn slot_window_crosses_midnight() {
        let config = RoomConfig::new(1, &["23:00"], 2).unwrap();
        let date = parse_date("2024-12-31").unwrap();
        let slot = TimeSlot::parse("23:00").unwrap();
        let (start, end) = config.slot_window(date, &slot);
        assert_eq!(start.to_string(), "2024-12-31 23:00:00");
        assert_eq!(end.to_string(), "2025-01-01 01:00:00");
        assert_eq!(config.slot_end_time(&slot).format("%H:%M").to_string(), "01:00");
    }

    #[test]
    fn validate_cell_checks_room_and_slot_membership() {
        let config = RoomConfig::new(2, &["18:00"], 2).unwrap();
        let date = parse_date("2024-01-01").unwrap();
        let ok = CellKey::new(date, 2, TimeSlot::parse("18:00").unwrap());
        assert!(config.validate_cell(&ok).is_ok());

        let bad_room = CellKey::new(date, 3, TimeSlot::parse("18:00").unwrap());
        assert_eq!(
            config.validate_cell(&bad_room),
            Err(ValidationError::RoomOutOfRange {
                room_number: 3,
                number_of_rooms: 2
            })
        );

        let bad_slot = CellKey::new(date, 1, TimeSlot::parse("19:00").unwrap());
        assert_eq!(
            config.validate_cell(&bad_slot),
            Err(ValidationError::UnknownTimeSlot("19:00".to_string()))
        );
    }
}
