use cinema_core::{config::HallConfig, error::HallError, hall::Hall, ticket::TicketWriter};
use std::fs;

fn setup() -> (tempfile::TempDir, Hall, TicketWriter) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let config = HallConfig::in_dir(dir.path());
    let tickets = TicketWriter::new(config.ticket_dir.clone()).unwrap();
    let hall = Hall::open(config).unwrap();
    (dir, hall, tickets)
}

#[test]
fn booking_alice_writes_her_receipt() {
    let (dir, mut hall, tickets) = setup();
    let booking = hall.book_seat("a1", "Alice").unwrap();

    let path = tickets.generate_ticket(&hall, &booking.customer, &booking.seat).unwrap();
    assert_eq!(path, dir.path().join("tickets").join("Ticket_A1_Alice.txt"));

    let receipt = fs::read_to_string(&path).unwrap();
    assert!(receipt.contains("Guest:   Alice"), "{receipt}");
    assert!(receipt.contains("Seat:    A1 (Standard)"), "{receipt}");
    assert!(receipt.contains("Price:   $12.00"), "{receipt}");
    assert!(receipt.contains("Status:  PAID"), "{receipt}");
    assert!(receipt.contains("Date:    "), "{receipt}");
}

#[test]
fn vip_receipt_shows_category_and_price() {
    let (_dir, mut hall, tickets) = setup();
    hall.book_seat("D2", "Bob").unwrap();

    let path = tickets.generate_ticket(&hall, "Bob", "D2").unwrap();
    let receipt = fs::read_to_string(path).unwrap();
    assert!(receipt.contains("Seat:    D2 (VIP)"), "{receipt}");
    assert!(receipt.contains("Price:   $20.00"), "{receipt}");
}

#[test]
fn same_seat_and_name_overwrites_the_previous_receipt() {
    let (_dir, mut hall, tickets) = setup();
    hall.book_seat("B1", "Kim").unwrap();
    let path = tickets.generate_ticket(&hall, "Kim", "B1").unwrap();
    fs::write(&path, "stale").unwrap();

    hall.reset().unwrap();
    hall.book_seat("B1", "Kim").unwrap();
    let again = tickets.generate_ticket(&hall, "Kim", "B1").unwrap();

    assert_eq!(again, path);
    let receipt = fs::read_to_string(&again).unwrap();
    assert!(receipt.contains("Guest:   Kim"), "receipt was not overwritten: {receipt}");
    assert_eq!(fs::read_dir(tickets.dir()).unwrap().count(), 1);
}

#[test]
fn unknown_seat_has_no_receipt() {
    let (_dir, hall, tickets) = setup();
    let err = tickets.generate_ticket(&hall, "Nobody", "Q9").unwrap_err();
    assert!(matches!(err, HallError::InvalidSeat { .. }), "got {err:?}");
}
