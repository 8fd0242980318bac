use roomdesk_core::db::open_db_in_memory;
use roomdesk_core::{
    ReservationService, ReserveRequest, RoomConfig, SqliteReservationRepository, StatsReporter,
};

#[test]
fn empty_store_reports_zeroes() {
    let conn = open_db_in_memory().unwrap();
    let stats = StatsReporter::new(SqliteReservationRepository::try_new(&conn).unwrap())
        .report()
        .unwrap();
    assert_eq!(stats.total, 0);
    assert!(stats.by_room.is_empty());
    assert!(stats.by_slot.is_empty());
}

#[test]
fn report_tracks_reserve_and_cancel() {
    let conn = open_db_in_memory().unwrap();
    let config = RoomConfig::default();
    let service = ReservationService::new(SqliteReservationRepository::try_new(&conn).unwrap());
    let reporter = StatsReporter::new(SqliteReservationRepository::try_new(&conn).unwrap());

    let mut ids = Vec::new();
    for (date, room, slot) in [
        ("2024-01-01", 1, "18:00"),
        ("2024-01-01", 1, "20:00"),
        ("2024-01-02", 3, "18:00"),
    ] {
        let receipt = service
            .reserve(
                &config,
                &ReserveRequest {
                    date: date.to_string(),
                    room_number: room,
                    time_slot: slot.to_string(),
                    name: "Guest".to_string(),
                    reserve_agent: None,
                    special_request: None,
                },
            )
            .unwrap();
        ids.push(receipt.reservation_id);
    }

    let stats = reporter.report().unwrap();
    assert_eq!(stats.total, 3);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(
        json["by_room"],
        serde_json::json!([
            { "room_number": 1, "count": 2 },
            { "room_number": 3, "count": 1 }
        ])
    );
    assert_eq!(
        json["by_slot"],
        serde_json::json!([
            { "time_slot": "18:00", "count": 2 },
            { "time_slot": "20:00", "count": 1 }
        ])
    );

    service.cancel(ids[1].as_str()).unwrap();
    let stats = reporter.report().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_slot.len(), 1);
}
