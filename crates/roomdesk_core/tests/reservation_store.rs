use roomdesk_core::db::open_db_in_memory;
use roomdesk_core::{
    parse_date, CellKey, RepoError, Reservation, ReservationId, ReservationRepository,
    ReservationSearch, RoomCount, SlotCount, SqliteReservationRepository, TimeSlot,
};
use rusqlite::Connection;

fn booking(date: &str, room: u32, slot: &str, name: &str) -> Reservation {
    let cell = CellKey::new(parse_date(date).unwrap(), room, TimeSlot::parse(slot).unwrap());
    Reservation::new(cell, name, None, None)
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let cell = CellKey::new(
        parse_date("2024-01-01").unwrap(),
        1,
        TimeSlot::parse("18:00").unwrap(),
    );
    let reservation = Reservation::new(
        cell,
        "Alice",
        Some("front desk".to_string()),
        Some("birthday cake".to_string()),
    );
    let id = repo.create_reservation(&reservation).unwrap();
    assert_eq!(id.as_str(), "20240101011800");

    let loaded = repo.get_reservation(&id).unwrap().unwrap();
    assert_eq!(loaded, reservation);
}

#[test]
fn duplicate_cell_is_rejected_by_storage_constraint() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let first = booking("2024-01-01", 1, "18:00", "Alice");
    let second = booking("2024-01-01", 1, "18:00", "Mallory");
    repo.create_reservation(&first).unwrap();

    let err = repo.create_reservation(&second).unwrap_err();
    assert!(matches!(err, RepoError::Conflict(ref id) if *id == first.id));

    assert_eq!(repo.count_all().unwrap(), 1);
    let kept = repo.get_reservation(&first.id).unwrap().unwrap();
    assert_eq!(kept.name, "Alice");
}

#[test]
fn duplicate_insert_from_second_connection_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");
    let conn_a = roomdesk_core::db::open_db(&path).unwrap();
    let conn_b = roomdesk_core::db::open_db(&path).unwrap();
    let repo_a = SqliteReservationRepository::try_new(&conn_a).unwrap();
    let repo_b = SqliteReservationRepository::try_new(&conn_b).unwrap();

    repo_a
        .create_reservation(&booking("2024-05-05", 2, "20:00", "First"))
        .unwrap();
    let err = repo_b
        .create_reservation(&booking("2024-05-05", 2, "20:00", "Second"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[test]
fn delete_returns_removed_record_then_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let reservation = booking("2024-01-01", 2, "20:00", "Bob");
    repo.create_reservation(&reservation).unwrap();

    let removed = repo.delete_reservation(&reservation.id).unwrap();
    assert_eq!(removed, reservation);
    assert!(repo.get_reservation(&reservation.id).unwrap().is_none());

    let err = repo.delete_reservation(&reservation.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref id) if *id == reservation.id));
}

#[test]
fn list_by_date_orders_by_room_then_slot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    for reservation in [
        booking("2024-01-01", 2, "18:00", "C"),
        booking("2024-01-01", 1, "20:00", "B"),
        booking("2024-01-01", 1, "18:00", "A"),
        booking("2024-01-02", 1, "18:00", "Other day"),
    ] {
        repo.create_reservation(&reservation).unwrap();
    }

    let names: Vec<String> = repo
        .list_by_date(parse_date("2024-01-01").unwrap())
        .unwrap()
        .into_iter()
        .map(|reservation| reservation.name)
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn search_returns_union_of_criteria() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let on_date = booking("2024-01-01", 1, "18:00", "Alice");
    let by_id = booking("2024-02-02", 2, "18:00", "Bob");
    let by_name = booking("2024-03-03", 3, "20:00", "Charlotte ALICEson");
    let unrelated = booking("2024-04-04", 4, "20:00", "Dave");
    for reservation in [&on_date, &by_id, &by_name, &unrelated] {
        repo.create_reservation(reservation).unwrap();
    }

    let query = ReservationSearch {
        date: Some(parse_date("2024-01-01").unwrap()),
        id: Some(by_id.id.clone()),
        name: Some("alice".to_string()),
    };
    let ids: Vec<ReservationId> = repo
        .search(&query)
        .unwrap()
        .into_iter()
        .map(|reservation| reservation.id)
        .collect();
    assert_eq!(ids, vec![on_date.id, by_id.id, by_name.id]);
}

#[test]
fn search_name_is_a_literal_substring() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    repo.create_reservation(&booking("2024-01-01", 1, "18:00", "100% Club"))
        .unwrap();
    repo.create_reservation(&booking("2024-01-01", 2, "18:00", "1000 Club"))
        .unwrap();

    let query = ReservationSearch {
        name: Some("0%".to_string()),
        ..ReservationSearch::default()
    };
    let found = repo.search(&query).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100% Club");

    assert!(repo.search(&ReservationSearch::default()).unwrap().is_empty());
}

#[test]
fn grouped_counts_are_ordered_by_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    for reservation in [
        booking("2024-01-01", 2, "20:00", "A"),
        booking("2024-01-01", 1, "18:00", "B"),
        booking("2024-01-02", 1, "18:00", "C"),
    ] {
        repo.create_reservation(&reservation).unwrap();
    }

    assert_eq!(repo.count_all().unwrap(), 3);
    assert_eq!(
        repo.count_by_room().unwrap(),
        vec![
            RoomCount {
                room_number: 1,
                count: 2
            },
            RoomCount {
                room_number: 2,
                count: 1
            },
        ]
    );
    assert_eq!(
        repo.count_by_slot().unwrap(),
        vec![
            SlotCount {
                time_slot: "18:00".to_string(),
                count: 2
            },
            SlotCount {
                time_slot: "20:00".to_string(),
                count: 1
            },
        ]
    );
}

#[test]
fn blank_name_fails_validation_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let err = repo
        .create_reservation(&booking("2024-01-01", 1, "18:00", "   "))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.count_all().unwrap(), 0);
}

#[test]
fn corrupted_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO reservations (id, date, room_number, time_slot, name)
         VALUES ('20240101011800', '2024-01-01', 1, '6pm', 'Eve');",
        [],
    )
    .unwrap();
    let repo = SqliteReservationRepository::try_new(&conn).unwrap();

    let id = ReservationId::parse("20240101011800").unwrap();
    let err = repo.get_reservation(&id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn try_new_requires_migrated_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteReservationRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("reservations")));
}
