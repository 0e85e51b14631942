//! Text receipts, one file per completed booking.

use crate::{
    error::{HallError, HallResult},
    hall::Hall,
    seat::Seat,
};
use chrono::{Local, NaiveDateTime};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct TicketWriter {
    dir: PathBuf,
}

impl TicketWriter {
    /// Create the ticket directory if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> HallResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| HallError::Persistence {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ticket_path(&self, seat_id: &str, name: &str) -> PathBuf {
        self.dir.join(format!("Ticket_{seat_id}_{name}.txt"))
    }

    /// Write the receipt for a booked seat, stamped with the current local time.
    ///
    /// An existing receipt at the same path is overwritten.
    pub fn generate_ticket(&self, hall: &Hall, name: &str, seat_id: &str) -> HallResult<PathBuf> {
        let seat = hall
            .seat(seat_id)
            .ok_or_else(|| HallError::InvalidSeat { seat: seat_id.to_string() })?;
        let content = render_ticket(seat, name, Local::now().naive_local());

        let path = self.ticket_path(seat_id, name);
        fs::write(&path, content).map_err(|source| HallError::Persistence {
            path: path.display().to_string(),
            source,
        })?;

        log::info!("Receipt generated: {}", path.display());
        Ok(path)
    }
}

pub fn render_ticket(seat: &Seat, name: &str, issued_at: NaiveDateTime) -> String {
    let rule = "=".repeat(32);
    let thin = "-".repeat(32);
    let mut text = [
        rule.clone(),
        "     CINEMA TICKET RECEIPT".to_string(),
        rule.clone(),
        format!("Date:    {}", issued_at.format(TIMESTAMP_FORMAT)),
        format!("Guest:   {name}"),
        thin.clone(),
        format!("Seat:    {} ({})", seat.code(), seat.category()),
        format!("Price:   ${:.2}", seat.price),
        thin,
        "Status:  PAID".to_string(),
        rule,
        "Please show this at the entrance.".to_string(),
    ]
    .join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn issued_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(19, 30, 5)
            .unwrap()
    }

    #[test]
    fn renders_standard_seat() {
        let seat = Seat::new('A', 1, 12.0, false);
        let ticket = render_ticket(&seat, "Alice", issued_at());

        assert!(ticket.contains("Date:    2024-03-09 19:30:05"), "{ticket}");
        assert!(ticket.contains("Guest:   Alice"), "{ticket}");
        assert!(ticket.contains("Seat:    A1 (Standard)"), "{ticket}");
        assert!(ticket.contains("Price:   $12.00"), "{ticket}");
        assert!(ticket.contains("Status:  PAID"), "{ticket}");
    }

    #[test]
    fn renders_vip_seat_with_two_decimals() {
        let seat = Seat::new('D', 2, 20.5, true);
        let ticket = render_ticket(&seat, "Bob", issued_at());

        assert!(ticket.contains("Seat:    D2 (VIP)"), "{ticket}");
        assert!(ticket.contains("Price:   $20.50"), "{ticket}");
    }

    #[test]
    fn path_combines_seat_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TicketWriter::new(dir.path().join("tickets")).unwrap();
        assert!(writer.dir().is_dir());
        assert_eq!(
            writer.ticket_path("A1", "Alice"),
            dir.path().join("tickets").join("Ticket_A1_Alice.txt")
        );
    }
}
