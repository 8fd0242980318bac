//! Read-only reservation statistics.

use crate::repo::reservation_repo::{RepoResult, ReservationRepository, RoomCount, SlotCount};
use serde::Serialize;

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationStats {
    pub total: u64,
    /// Ordered by room number.
    pub by_room: Vec<RoomCount>,
    /// Ordered by slot label.
    pub by_slot: Vec<SlotCount>,
}

pub struct StatsReporter<R: ReservationRepository> {
    repo: R,
}

impl<R: ReservationRepository> StatsReporter<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn report(&self) -> RepoResult<ReservationStats> {
        Ok(ReservationStats {
            total: self.repo.count_all()?,
            by_room: self.repo.count_by_room()?,
            by_slot: self.repo.count_by_slot()?,
        })
    }
}
