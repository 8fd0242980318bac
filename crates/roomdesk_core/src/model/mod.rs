//! Domain model for room reservations.
//!
//! # Responsibility
//! - Define validated value types for the (date, room, slot) booking grid.
//! - Own identifier derivation so every layer agrees on cell identity.
//!
//! # Invariants
//! - A `ReservationId` maps to exactly one `CellKey` and back.
//! - `RoomConfig` can only be built through validating constructors.

pub mod availability;
pub mod reservation;
pub mod room_config;
pub mod time_slot;
pub mod validation;
