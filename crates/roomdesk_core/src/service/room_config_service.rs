//! Room settings use-case service.
//!
//! # Responsibility
//! - Resolve the startup configuration (stored row or defaults).
//! - Apply admin layout updates uniformly to every room.
//!
//! # Invariants
//! - After `initialize`, a settings row always exists.
//! - Updates never touch reservations; bookings on removed rooms or slots
//!   stay in the store but drop out of availability.

use crate::model::room_config::RoomConfig;
use crate::repo::reservation_repo::RepoResult;
use crate::repo::settings_repo::RoomConfigRepository;
use log::info;

pub struct RoomConfigService<R: RoomConfigRepository> {
    repo: R,
}

impl<R: RoomConfigRepository> RoomConfigService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the stored configuration, persisting defaults on first run.
    pub fn initialize(&self) -> RepoResult<RoomConfig> {
        if let Some(config) = self.repo.load_room_config()? {
            info!(
                "event=settings_init module=service status=ok source=stored rooms={} slots={}",
                config.number_of_rooms(),
                config.time_slots().len()
            );
            return Ok(config);
        }

        let config = RoomConfig::default();
        self.repo.save_room_config(&config)?;
        info!(
            "event=settings_init module=service status=ok source=default rooms={} slots={}",
            config.number_of_rooms(),
            config.time_slots().len()
        );
        Ok(config)
    }

    /// Returns the stored configuration, or defaults when none is stored.
    pub fn current(&self) -> RepoResult<RoomConfig> {
        Ok(self.repo.load_room_config()?.unwrap_or_default())
    }

    /// Replaces room count and slot list, keeping the duration offset.
    pub fn update<S: AsRef<str>>(
        &self,
        number_of_rooms: u32,
        slot_labels: &[S],
    ) -> RepoResult<RoomConfig> {
        self.update_settings(number_of_rooms, slot_labels, None)
    }

    /// Replaces the layout and optionally the duration offset in one write.
    pub fn update_settings<S: AsRef<str>>(
        &self,
        number_of_rooms: u32,
        slot_labels: &[S],
        duration_offset_hours: Option<u32>,
    ) -> RepoResult<RoomConfig> {
        let current = self.current()?;
        let duration = duration_offset_hours.unwrap_or(current.duration_offset_hours());
        let updated = RoomConfig::new(number_of_rooms, slot_labels, duration)?;
        self.repo.save_room_config(&updated)?;
        info!(
            "event=settings_update module=service status=ok rooms={} slots={} duration_hours={}",
            updated.number_of_rooms(),
            updated.slot_labels().join(","),
            updated.duration_offset_hours()
        );
        Ok(updated)
    }
}
