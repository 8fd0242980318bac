//! Slot availability computation.
//!
//! # Responsibility
//! - Partition every configured (room, slot) cell of one date into booked
//!   and available.
//!
//! # Invariants
//! - Pure function of its inputs; the caller supplies a fresh reservation
//!   list, so no slot cache can drift from the store.
//! - Rooms are visited in ascending number and slots in configured order.
//! - Reservations on other dates or outside the layout are ignored.

use crate::model::availability::{AvailabilitySnapshot, AvailableRoom, BookedCell};
use crate::model::reservation::Reservation;
use crate::model::room_config::RoomConfig;
use crate::model::time_slot::TimeSlot;
use chrono::NaiveDate;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Computes the availability snapshot for `date`.
pub fn compute_availability(
    date: NaiveDate,
    reservations: &[Reservation],
    config: &RoomConfig,
) -> AvailabilitySnapshot {
    let by_cell: HashMap<(u32, TimeSlot), &Reservation> = reservations
        .iter()
        .filter(|reservation| reservation.date == date)
        .map(|reservation| ((reservation.room_number, reservation.time_slot), reservation))
        .collect();

    let mut available: BTreeMap<u32, AvailableRoom> = BTreeMap::new();
    let mut booked = Vec::new();

    for room in config.rooms() {
        for slot in config.time_slots() {
            match by_cell.get(&(room.number, *slot)) {
                Some(reservation) => {
                    let (start_time, end_time) = config.slot_window(date, slot);
                    booked.push(BookedCell {
                        reservation_id: reservation.id.clone(),
                        room_name: room.name.clone(),
                        room_number: room.number,
                        time_slot: *slot,
                        start_time,
                        end_time,
                        name: reservation.name.clone(),
                    });
                }
                None => available
                    .entry(room.number)
                    .or_insert_with(|| AvailableRoom {
                        name: room.name.clone(),
                        slots: Vec::new(),
                    })
                    .slots
                    .push(*slot),
            }
        }
    }

    let snapshot = AvailabilitySnapshot {
        date,
        available,
        booked,
    };
    debug!(
        "event=availability_compute module=service status=ok date={} cells={} booked={}",
        date,
        snapshot.cell_count(),
        snapshot.booked_count()
    );
    snapshot
}
