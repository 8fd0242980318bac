//! Text and JSON rendering for CLI results.

use anyhow::Result;
use roomdesk_core::{
    AvailabilitySnapshot, Reservation, ReservationConflict, ReservationReceipt, ReservationStats,
    RoomConfig, ScheduledReservation,
};
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn availability(snapshot: &AvailabilitySnapshot, json: bool) -> Result<()> {
    if json {
        return print_json(snapshot);
    }

    println!("Availability for {}", snapshot.date.format("%Y-%m-%d"));
    println!("Available:");
    if snapshot.available.is_empty() {
        println!("  (none)");
    }
    for room in snapshot.available.values() {
        let slots: Vec<String> = room.slots.iter().map(ToString::to_string).collect();
        println!("  {}: {}", room.name, slots.join(", "));
    }
    println!("Booked:");
    if snapshot.booked.is_empty() {
        println!("  (none)");
    }
    for cell in &snapshot.booked {
        println!(
            "  {} {} - {} {} [{}]",
            cell.room_name,
            cell.start_time.format("%H:%M"),
            cell.end_time.format("%H:%M"),
            cell.name,
            cell.reservation_id
        );
    }
    Ok(())
}

pub fn receipt(receipt: &ReservationReceipt, json: bool) -> Result<()> {
    if json {
        return print_json(receipt);
    }
    println!(
        "Reservation successful: Reservation ID {}, Room {}, {} - {} reserved by {}",
        receipt.reservation_id,
        receipt.room_number,
        receipt.time_slot,
        receipt.end_time.format("%H:%M"),
        receipt.name
    );
    Ok(())
}

pub fn conflict(conflict: &ReservationConflict, json: bool) -> Result<()> {
    if json {
        return print_json(conflict);
    }
    println!("Reservation failed: {conflict}");
    Ok(())
}

pub fn cancelled(reservation: &Reservation, json: bool) -> Result<()> {
    if json {
        return print_json(reservation);
    }
    println!("Reservation {} cancelled successfully", reservation.id);
    Ok(())
}

pub fn reservation_detail(reservation: &Reservation, config: &RoomConfig, json: bool) -> Result<()> {
    if json {
        return print_json(reservation);
    }
    let (start, end) = config.slot_window(reservation.date, &reservation.time_slot);
    println!("Reservation {}", reservation.id);
    println!("  Room:    {}", reservation.room_name());
    println!("  Date:    {}", reservation.date_label());
    println!("  Time:    {} - {}", start.format("%H:%M"), end.format("%H:%M"));
    println!("  Guest:   {}", reservation.name);
    println!(
        "  Agent:   {}",
        reservation.reserve_agent.as_deref().unwrap_or("-")
    );
    println!(
        "  Request: {}",
        reservation.special_request.as_deref().unwrap_or("-")
    );
    Ok(())
}

pub fn day_listing(date: &str, listing: &[ScheduledReservation], json: bool) -> Result<()> {
    if json {
        return print_json(listing);
    }
    println!("Reservations on {date}");
    if listing.is_empty() {
        println!("  (none)");
    }
    for entry in listing {
        println!(
            "  {} {} {} - {} {}",
            entry.reservation_id,
            entry.room_name,
            entry.start_time.format(TIME_FORMAT),
            entry.end_time.format(TIME_FORMAT),
            entry.name
        );
    }
    Ok(())
}

pub fn search_results(found: &[Reservation], json: bool) -> Result<()> {
    if json {
        return print_json(found);
    }
    println!("{} reservation(s) found", found.len());
    for reservation in found {
        println!(
            "  {} {} {} {} {}",
            reservation.id,
            reservation.date_label(),
            reservation.room_name(),
            reservation.time_slot,
            reservation.name
        );
    }
    Ok(())
}

pub fn settings(config: &RoomConfig, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }
    println!("Number of rooms: {}", config.number_of_rooms());
    println!("Time slots:      {}", config.slot_labels().join(","));
    println!("Duration:        {}h", config.duration_offset_hours());
    Ok(())
}

pub fn stats(stats: &ReservationStats, json: bool) -> Result<()> {
    if json {
        return print_json(stats);
    }
    println!("Total reservations: {}", stats.total);
    println!("By room:");
    for row in &stats.by_room {
        println!("  Room {}: {}", row.room_number, row.count);
    }
    println!("By time slot:");
    for row in &stats.by_slot {
        println!("  {}: {}", row.time_slot, row.count);
    }
    Ok(())
}
