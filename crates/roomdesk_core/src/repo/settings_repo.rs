//! Room settings persistence.
//!
//! The `settings` table holds at most one row (`id = 1`). Slot labels are
//! stored comma-joined in configured order.

use crate::model::room_config::RoomConfig;
use crate::repo::reservation_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for the persisted room configuration.
pub trait RoomConfigRepository {
    /// Reads the first settings row, if any.
    fn load_room_config(&self) -> RepoResult<Option<RoomConfig>>;
    /// Replaces the settings row in a single commit.
    fn save_room_config(&self, config: &RoomConfig) -> RepoResult<()>;
}

pub struct SqliteRoomConfigRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoomConfigRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        super::ensure_tables(conn, &["settings"])?;
        Ok(Self { conn })
    }
}

impl RoomConfigRepository for SqliteRoomConfigRepository<'_> {
    fn load_room_config(&self) -> RepoResult<Option<RoomConfig>> {
        let row = self
            .conn
            .query_row(
                "SELECT number_of_rooms, time_slots, time_delta
                 FROM settings
                 ORDER BY id ASC
                 LIMIT 1;",
                [],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, u32>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((number_of_rooms, joined_slots, time_delta)) = row else {
            return Ok(None);
        };

        let labels: Vec<&str> = joined_slots.split(',').collect();
        RoomConfig::new(number_of_rooms, labels.as_slice(), time_delta)
            .map(Some)
            .map_err(|err| RepoError::InvalidData(format!("settings row: {err}")))
    }

    fn save_room_config(&self, config: &RoomConfig) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO settings (id, number_of_rooms, time_slots, time_delta)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                number_of_rooms = excluded.number_of_rooms,
                time_slots = excluded.time_slots,
                time_delta = excluded.time_delta,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                config.number_of_rooms(),
                config.slot_labels().join(","),
                config.duration_offset_hours(),
            ],
        )?;
        Ok(())
    }
}
