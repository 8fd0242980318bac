//! Core domain logic for RoomDesk room reservations.
//! This crate is the single source of truth for booking invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::availability::{AvailabilitySnapshot, AvailableRoom, BookedCell};
pub use model::reservation::{CellKey, Reservation, ReservationId};
pub use model::room_config::{Room, RoomConfig};
pub use model::time_slot::TimeSlot;
pub use model::validation::{parse_date, ValidationError};
pub use repo::reservation_repo::{
    RepoError, RepoResult, ReservationRepository, ReservationSearch, RoomCount, SlotCount,
    SqliteReservationRepository,
};
pub use repo::settings_repo::{RoomConfigRepository, SqliteRoomConfigRepository};
pub use service::availability::compute_availability;
pub use service::reservation_service::{
    ReservationConflict, ReservationReceipt, ReservationService, ReservationServiceError,
    ReserveRequest, ScheduledReservation,
};
pub use service::room_config_service::RoomConfigService;
pub use service::stats_service::{ReservationStats, StatsReporter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
