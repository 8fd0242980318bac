//! Availability snapshot types.

use crate::model::reservation::ReservationId;
use crate::model::time_slot::TimeSlot;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Free slots of one room, in configured slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableRoom {
    pub name: String,
    pub slots: Vec<TimeSlot>,
}

/// One booked cell with the reservation that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookedCell {
    pub reservation_id: ReservationId,
    pub room_name: String,
    pub room_number: u32,
    pub time_slot: TimeSlot,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub name: String,
}

/// Partition of every configured cell on one date.
///
/// `available` only lists rooms that still have a free slot. Every
/// configured cell appears exactly once across `available` and `booked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilitySnapshot {
    pub date: NaiveDate,
    pub available: BTreeMap<u32, AvailableRoom>,
    pub booked: Vec<BookedCell>,
}

impl AvailabilitySnapshot {
    pub fn available_count(&self) -> usize {
        self.available.values().map(|room| room.slots.len()).sum()
    }

    pub fn booked_count(&self) -> usize {
        self.booked.len()
    }

    /// Total cells covered by the snapshot.
    pub fn cell_count(&self) -> usize {
        self.available_count() + self.booked_count()
    }

    pub fn is_available(&self, room_number: u32, slot: &TimeSlot) -> bool {
        self.available
            .get(&room_number)
            .is_some_and(|room| room.slots.contains(slot))
    }

    pub fn booking_for(&self, room_number: u32, slot: &TimeSlot) -> Option<&BookedCell> {
        self.booked
            .iter()
            .find(|cell| cell.room_number == room_number && &cell.time_slot == slot)
    }
}
