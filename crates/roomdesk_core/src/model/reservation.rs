//! Reservation records and cell identity.
//!
//! # Responsibility
//! - Define the `(date, room, slot)` cell and its derived identifier.
//! - Define the canonical reservation record persisted by the store.
//!
//! # Invariants
//! - `ReservationId` is `YYYYMMDD` + zero-padded two-digit room + `HHMM`.
//! - `ReservationId::derive` is injective over valid cells and
//!   `ReservationId::cell` is its exact inverse.
//! - A stored reservation's id always equals the id derived from its cell.

use crate::model::room_config::MAX_ROOMS;
use crate::model::time_slot::TimeSlot;
use crate::model::validation::{format_date, ValidationError};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static RESERVATION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{14}$").expect("valid reservation id regex"));

/// One bookable unit: a room at a slot on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub date: NaiveDate,
    pub room_number: u32,
    pub slot: TimeSlot,
}

impl CellKey {
    pub fn new(date: NaiveDate, room_number: u32, slot: TimeSlot) -> Self {
        Self {
            date,
            room_number,
            slot,
        }
    }

    /// Start timestamp of this cell (date + slot).
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.slot.start())
    }
}

/// Deterministic reservation identifier derived from a cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(String);

impl ReservationId {
    /// Derives the identifier for a cell.
    ///
    /// Room numbers above [`MAX_ROOMS`] are never produced by a valid
    /// `RoomConfig`, which keeps the two-digit room segment fixed width.
    pub fn derive(cell: &CellKey) -> Self {
        debug_assert!(cell.room_number >= 1 && cell.room_number <= MAX_ROOMS);
        Self(format!(
            "{}{:02}{}",
            cell.date.format("%Y%m%d"),
            cell.room_number,
            cell.slot.digits()
        ))
    }

    /// Parses an identifier typed by a caller.
    ///
    /// The value must decode back to a real cell; `20240230011800` is
    /// rejected because February 30th does not exist.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !RESERVATION_ID_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidReservationId(value.to_string()));
        }
        let id = Self(trimmed.to_string());
        id.cell()
            .map_err(|_| ValidationError::InvalidReservationId(value.to_string()))?;
        Ok(id)
    }

    /// Decodes the cell this identifier names.
    pub fn cell(&self) -> Result<CellKey, ValidationError> {
        let invalid = || ValidationError::InvalidReservationId(self.0.clone());
        if !RESERVATION_ID_RE.is_match(&self.0) {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(&self.0[0..8], "%Y%m%d").map_err(|_| invalid())?;
        let room_number: u32 = self.0[8..10].parse().map_err(|_| invalid())?;
        if room_number == 0 {
            return Err(invalid());
        }
        let slot = TimeSlot::parse(&format!("{}:{}", &self.0[10..12], &self.0[12..14]))
            .map_err(|_| invalid())?;

        Ok(CellKey::new(date, room_number, slot))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ReservationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub date: NaiveDate,
    pub room_number: u32,
    pub time_slot: TimeSlot,
    /// Guest name. Searchable by case-insensitive substring.
    pub name: String,
    pub reserve_agent: Option<String>,
    pub special_request: Option<String>,
}

impl Reservation {
    /// Builds a reservation for a cell, deriving its identifier.
    ///
    /// Optional text fields are trimmed; blank values become `None`.
    pub fn new(
        cell: CellKey,
        name: impl Into<String>,
        reserve_agent: Option<String>,
        special_request: Option<String>,
    ) -> Self {
        Self {
            id: ReservationId::derive(&cell),
            date: cell.date,
            room_number: cell.room_number,
            time_slot: cell.slot,
            name: name.into().trim().to_string(),
            reserve_agent: normalize_optional_text(reserve_agent),
            special_request: normalize_optional_text(special_request),
        }
    }

    pub fn cell(&self) -> CellKey {
        CellKey::new(self.date, self.room_number, self.time_slot)
    }

    /// Returns the display name of the booked room.
    pub fn room_name(&self) -> String {
        crate::model::room_config::room_name(self.room_number)
    }

    pub fn date_label(&self) -> String {
        format_date(self.date)
    }

    /// Checks record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyGuestName);
        }
        if self.room_number == 0 || self.room_number > MAX_ROOMS {
            return Err(ValidationError::RoomOutOfRange {
                room_number: self.room_number,
                number_of_rooms: MAX_ROOMS,
            });
        }
        if self.id != ReservationId::derive(&self.cell()) {
            return Err(ValidationError::InvalidReservationId(self.id.0.clone()));
        }
        Ok(())
    }
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
