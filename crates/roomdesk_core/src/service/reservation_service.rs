//! Reservation use-case service.
//!
//! # Responsibility
//! - Validate booking input against the current room configuration.
//! - Create reservations under their derived cell identifier.
//! - Cancel reservations and answer lookup/listing queries.
//!
//! # Invariants
//! - A conflict leaves the store untouched; the storage constraint decides it.
//! - Availability is recomputed from the store on every call.
//! - Guest names and special requests never reach the logs.

use crate::model::availability::AvailabilitySnapshot;
use crate::model::reservation::{CellKey, Reservation, ReservationId};
use crate::model::room_config::{room_name, RoomConfig};
use crate::model::time_slot::TimeSlot;
use crate::model::validation::{parse_date, ValidationError};
use crate::repo::reservation_repo::{RepoError, ReservationRepository, ReservationSearch};
use crate::service::availability::compute_availability;
use chrono::{NaiveDateTime, NaiveTime};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Booking request in caller-facing plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub room_number: u32,
    /// `HH:MM`, must be one of the configured slots.
    pub time_slot: String,
    pub name: String,
    pub reserve_agent: Option<String>,
    pub special_request: Option<String>,
}

/// Successful booking result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationReceipt {
    pub reservation_id: ReservationId,
    pub room_number: u32,
    pub room_name: String,
    pub time_slot: TimeSlot,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub name: String,
}

/// Details of the reservation already holding a requested cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationConflict {
    pub existing_id: ReservationId,
    pub room_number: u32,
    pub time_slot: TimeSlot,
    pub end_time: NaiveTime,
}

impl Display for ReservationConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Room {}, {} - {} is already reserved",
            self.room_number,
            self.time_slot,
            self.end_time.format("%H:%M")
        )
    }
}

/// One reservation of a day listing, with its computed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledReservation {
    pub reservation_id: ReservationId,
    pub room_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub name: String,
}

/// Service error for reservation use-cases.
#[derive(Debug)]
pub enum ReservationServiceError {
    /// Malformed date/time/room/name/id input.
    InvalidInput(ValidationError),
    /// Target reservation does not exist.
    NotFound(ReservationId),
    /// Requested cell is already booked.
    Conflict(ReservationConflict),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ReservationServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::NotFound(id) => write!(f, "Reservation {id} not found"),
            Self::Conflict(conflict) => write!(f, "Reservation failed: {conflict}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReservationServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ReservationServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for ReservationServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidInput(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ReservationServiceError>;

/// Reservation service facade over a reservation store.
pub struct ReservationService<R: ReservationRepository> {
    repo: R,
}

impl<R: ReservationRepository> ReservationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Books one cell.
    ///
    /// # Contract
    /// - Rejects malformed dates, unknown slots, rooms outside the layout and
    ///   blank names before touching the store.
    /// - Returns `Conflict` with the occupied cell's end time when the derived
    ///   identifier already exists.
    pub fn reserve(
        &self,
        config: &RoomConfig,
        request: &ReserveRequest,
    ) -> ServiceResult<ReservationReceipt> {
        let date = parse_date(&request.date)?;
        let slot = TimeSlot::parse(&request.time_slot)?;
        let cell = CellKey::new(date, request.room_number, slot);
        config.validate_cell(&cell)?;
        if request.name.trim().is_empty() {
            return Err(ValidationError::EmptyGuestName.into());
        }

        let reservation = Reservation::new(
            cell,
            request.name.as_str(),
            request.reserve_agent.clone(),
            request.special_request.clone(),
        );

        match self.repo.create_reservation(&reservation) {
            Ok(id) => {
                info!(
                    "event=reservation_create module=service status=ok id={} room={} slot={}",
                    id, cell.room_number, cell.slot
                );
                let (start_time, end_time) = config.slot_window(date, &slot);
                Ok(ReservationReceipt {
                    reservation_id: id,
                    room_number: cell.room_number,
                    room_name: room_name(cell.room_number),
                    time_slot: slot,
                    start_time,
                    end_time,
                    name: reservation.name,
                })
            }
            Err(RepoError::Conflict(existing_id)) => {
                warn!(
                    "event=reservation_create module=service status=conflict id={}",
                    existing_id
                );
                Err(ReservationServiceError::Conflict(ReservationConflict {
                    existing_id,
                    room_number: cell.room_number,
                    time_slot: slot,
                    end_time: config.slot_end_time(&slot),
                }))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Cancels a reservation, returning the removed record.
    ///
    /// The cell becomes available again because availability is always
    /// derived from the store.
    pub fn cancel(&self, reservation_id: &str) -> ServiceResult<Reservation> {
        let id = ReservationId::parse(reservation_id)?;
        match self.repo.delete_reservation(&id) {
            Ok(reservation) => {
                info!(
                    "event=reservation_cancel module=service status=ok id={}",
                    reservation.id
                );
                Ok(reservation)
            }
            Err(err) => {
                warn!(
                    "event=reservation_cancel module=service status=error id={} error={}",
                    id, err
                );
                Err(err.into())
            }
        }
    }

    /// Gets one reservation by identifier.
    pub fn get(&self, reservation_id: &str) -> ServiceResult<Reservation> {
        let id = ReservationId::parse(reservation_id)?;
        self.repo
            .get_reservation(&id)?
            .ok_or(ReservationServiceError::NotFound(id))
    }

    /// Union search by exact date, exact id or guest name substring.
    ///
    /// Blank criteria are ignored; with no criteria the result is empty.
    pub fn search(
        &self,
        date: Option<&str>,
        reservation_id: Option<&str>,
        guest_name: Option<&str>,
    ) -> ServiceResult<Vec<Reservation>> {
        let query = ReservationSearch {
            date: non_blank(date).map(parse_date).transpose()?,
            id: non_blank(reservation_id)
                .map(ReservationId::parse)
                .transpose()?,
            name: non_blank(guest_name).map(str::to_string),
        };
        Ok(self.repo.search(&query)?)
    }

    /// Computes availability for a date from a fresh store read.
    pub fn availability(&self, config: &RoomConfig, date: &str) -> ServiceResult<AvailabilitySnapshot> {
        let date = parse_date(date)?;
        let reservations = self.repo.list_by_date(date)?;
        Ok(compute_availability(date, &reservations, config))
    }

    /// Lists all reservations of a date with their slot windows.
    ///
    /// Includes reservations whose slot was later removed from the layout.
    pub fn reservations_for_date(
        &self,
        config: &RoomConfig,
        date: &str,
    ) -> ServiceResult<Vec<ScheduledReservation>> {
        let date = parse_date(date)?;
        let reservations = self.repo.list_by_date(date)?;
        Ok(reservations
            .into_iter()
            .map(|reservation| {
                let (start_time, end_time) = config.slot_window(date, &reservation.time_slot);
                ScheduledReservation {
                    room_name: reservation.room_name(),
                    reservation_id: reservation.id,
                    start_time,
                    end_time,
                    name: reservation.name,
                }
            })
            .collect())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
