//! Reservation store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/get/delete/search APIs over the `reservations` table.
//! - Provide grouped counts for statistics.
//!
//! # Invariants
//! - `create_reservation` is a single autocommit insert; the primary key on
//!   `id` makes the uniqueness check atomic with respect to racing inserts.
//! - `delete_reservation` reads and deletes inside one immediate transaction.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::reservation::{Reservation, ReservationId};
use crate::model::time_slot::TimeSlot;
use crate::model::validation::{format_date, parse_date, ValidationError};
use chrono::NaiveDate;
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use rusqlite::{Transaction, TransactionBehavior};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const RESERVATION_SELECT_SQL: &str = "SELECT
    id,
    date,
    room_number,
    time_slot,
    name,
    reserve_agent,
    special_request
FROM reservations";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for reservation and settings persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(ReservationId),
    /// A reservation for the same cell already exists.
    Conflict(ReservationId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "reservation not found: {id}"),
            Self::Conflict(id) => write!(f, "reservation already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Search criteria; a row matches when ANY present criterion matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationSearch {
    /// Exact reservation date.
    pub date: Option<NaiveDate>,
    /// Exact reservation id.
    pub id: Option<ReservationId>,
    /// Case-insensitive guest name substring. Blank values are ignored.
    pub name: Option<String>,
}

impl ReservationSearch {
    fn name_pattern(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| format!("%{}%", escape_like(value)))
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.id.is_none() && self.name_pattern().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCount {
    pub room_number: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotCount {
    pub time_slot: String,
    pub count: u64,
}

/// Repository interface for reservation records.
pub trait ReservationRepository {
    /// Inserts a reservation, returning `Conflict` if its cell is taken.
    fn create_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId>;
    fn get_reservation(&self, id: &ReservationId) -> RepoResult<Option<Reservation>>;
    /// Deletes a reservation and returns the removed record.
    fn delete_reservation(&self, id: &ReservationId) -> RepoResult<Reservation>;
    /// Lists one date ordered by room, then slot.
    fn list_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Reservation>>;
    /// Union search over date, id and name; ordered by id.
    fn search(&self, query: &ReservationSearch) -> RepoResult<Vec<Reservation>>;
    fn count_all(&self) -> RepoResult<u64>;
    fn count_by_room(&self) -> RepoResult<Vec<RoomCount>>;
    fn count_by_slot(&self) -> RepoResult<Vec<SlotCount>>;
}

/// SQLite-backed reservation store.
pub struct SqliteReservationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReservationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        super::ensure_tables(conn, &["reservations"])?;
        Ok(Self { conn })
    }
}

impl ReservationRepository for SqliteReservationRepository<'_> {
    fn create_reservation(&self, reservation: &Reservation) -> RepoResult<ReservationId> {
        reservation.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO reservations (
                id,
                date,
                room_number,
                time_slot,
                name,
                reserve_agent,
                special_request
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                reservation.id.as_str(),
                format_date(reservation.date),
                reservation.room_number,
                reservation.time_slot.label(),
                reservation.name.as_str(),
                reservation.reserve_agent.as_deref(),
                reservation.special_request.as_deref(),
            ],
        );

        match inserted {
            Ok(_) => Ok(reservation.id.clone()),
            Err(err) if is_uniqueness_violation(&err) => {
                Err(RepoError::Conflict(reservation.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_reservation(&self, id: &ReservationId) -> RepoResult<Option<Reservation>> {
        load_reservation(self.conn, id)
    }

    fn delete_reservation(&self, id: &ReservationId) -> RepoResult<Reservation> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let reservation =
            load_reservation(&tx, id)?.ok_or_else(|| RepoError::NotFound(id.clone()))?;
        tx.execute("DELETE FROM reservations WHERE id = ?1;", [id.as_str()])?;
        tx.commit()?;
        Ok(reservation)
    }

    fn list_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESERVATION_SELECT_SQL}
             WHERE date = ?1
             ORDER BY room_number ASC, time_slot ASC;"
        ))?;
        let mut rows = stmt.query([format_date(date)])?;
        let mut reservations = Vec::new();
        while let Some(row) = rows.next()? {
            reservations.push(parse_reservation_row(row)?);
        }
        Ok(reservations)
    }

    fn search(&self, query: &ReservationSearch) -> RepoResult<Vec<Reservation>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "{RESERVATION_SELECT_SQL}
             WHERE (?1 IS NOT NULL AND date = ?1)
                OR (?2 IS NOT NULL AND id = ?2)
                OR (?3 IS NOT NULL AND name LIKE ?3 ESCAPE '\\')
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params![
            query.date.map(format_date),
            query.id.as_ref().map(ReservationId::as_str),
            query.name_pattern(),
        ])?;
        let mut reservations = Vec::new();
        while let Some(row) = rows.next()? {
            reservations.push(parse_reservation_row(row)?);
        }
        Ok(reservations)
    }

    fn count_all(&self) -> RepoResult<u64> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reservations;", [], |row| row.get(0))?;
        to_count(total)
    }

    fn count_by_room(&self) -> RepoResult<Vec<RoomCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT room_number, COUNT(id)
             FROM reservations
             GROUP BY room_number
             ORDER BY room_number ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next()? {
            counts.push(RoomCount {
                room_number: row.get(0)?,
                count: to_count(row.get(1)?)?,
            });
        }
        Ok(counts)
    }

    fn count_by_slot(&self) -> RepoResult<Vec<SlotCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT time_slot, COUNT(id)
             FROM reservations
             GROUP BY time_slot
             ORDER BY time_slot ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next()? {
            counts.push(SlotCount {
                time_slot: row.get(0)?,
                count: to_count(row.get(1)?)?,
            });
        }
        Ok(counts)
    }
}

fn load_reservation(conn: &Connection, id: &ReservationId) -> RepoResult<Option<Reservation>> {
    let mut stmt = conn.prepare(&format!("{RESERVATION_SELECT_SQL} WHERE id = ?1;"))?;
    let row = stmt
        .query_row([id.as_str()], |row| Ok(parse_reservation_row(row)))
        .optional()?;
    row.transpose()
}

fn parse_reservation_row(row: &Row<'_>) -> RepoResult<Reservation> {
    let id_text: String = row.get("id")?;
    let id = ReservationId::parse(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid id `{id_text}` in reservations.id"))
    })?;

    let date_text: String = row.get("date")?;
    let date = parse_date(&date_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in reservations.date"))
    })?;

    let slot_text: String = row.get("time_slot")?;
    let time_slot = TimeSlot::parse(&slot_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid time slot `{slot_text}` in reservations.time_slot"
        ))
    })?;

    let reservation = Reservation {
        id,
        date,
        room_number: row.get("room_number")?,
        time_slot,
        name: row.get("name")?,
        reserve_agent: row.get("reserve_agent")?,
        special_request: row.get("special_request")?,
    };
    reservation
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("reservation {id_text}: {err}")))?;
    Ok(reservation)
}

fn is_uniqueness_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                )
    )
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_count(value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative row count `{value}`")))
}
