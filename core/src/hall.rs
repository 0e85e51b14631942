//! The hall: exclusive owner of every seat in one theater.
//!
//! LIFECYCLE:
//!   1. open()      load the backing store, or synthesize a fresh grid
//!   2. book_seat() mutate one seat, then rewrite the full store
//!   3. reset()     discard every booking, then rewrite the full store
//!
//! The seat map always covers exactly the configured grid. A stored map
//! that does not is treated as corrupt and replaced with a fresh one.

use crate::{
    config::HallConfig,
    error::{HallError, HallResult},
    seat::{Seat, SeatRecord},
    store::HallStore,
    types::{parse_seat_code, row_letter, seat_code, ColNumber, RowIndex, SeatCode},
};
use std::collections::{BTreeMap, HashMap};

const RULE_WIDTH: usize = 40;
const BOOKED_SYMBOL: &str = "[ XX ]";

/// Confirmation of a completed booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub seat:     SeatCode,
    pub customer: String,
    pub price:    f64,
    pub is_vip:   bool,
}

pub struct Hall {
    config: HallConfig,
    seats:  HashMap<SeatCode, Seat>,
    store:  HallStore,
}

impl Hall {
    /// Build the hall for `config`, loading prior state when it exists.
    ///
    /// Only an invalid configuration is an error. A missing or corrupt
    /// backing store falls back to a fresh grid.
    pub fn open(config: HallConfig) -> HallResult<Self> {
        config.validate()?;
        let store = HallStore::new(config.db_file.clone());
        let mut hall = Self { config, seats: HashMap::new(), store };
        hall.load();
        Ok(hall)
    }

    /// Replace in-memory state with the backing store's contents.
    pub fn load(&mut self) {
        let loaded = self
            .store
            .read()
            .and_then(|records| records.map(|r| self.rebuild(r)).transpose());

        match loaded {
            Ok(Some(seats)) => {
                self.seats = seats;
                log::info!(
                    "Database loaded successfully from {} ({} booked)",
                    self.store.path().display(),
                    self.booked_count()
                );
            }
            Ok(None) => {
                log::info!("No database at {}", self.store.path().display());
                self.initialize_fresh();
            }
            Err(e) => {
                log::error!("Error loading database: {e}");
                self.initialize_fresh();
            }
        }
    }

    /// Rebuild the full grid from configuration, discarding all bookings.
    /// Does not persist.
    pub fn initialize_fresh(&mut self) {
        log::info!(
            "Initializing new theater layout: {} rows x {} seats",
            self.config.rows,
            self.config.cols
        );
        self.seats = self
            .grid()
            .map(|(index, row, col)| {
                let is_vip = index >= self.config.vip_row_start;
                let price = if is_vip { self.config.price_vip } else { self.config.price_std };
                (seat_code(row, col), Seat::new(row, col, price, is_vip))
            })
            .collect();
    }

    /// Book `seat_id` for `customer` and persist the hall.
    ///
    /// `seat_id` is case-insensitive. Rejections leave state and store
    /// untouched. If the save fails the booking is rolled back in memory
    /// and the persistence error is returned.
    pub fn book_seat(&mut self, seat_id: &str, customer: &str) -> HallResult<Booking> {
        let code = seat_id.trim().to_uppercase();

        let booking = {
            let Some(seat) = self.seats.get_mut(&code) else {
                log::warn!("Booking rejected: unknown seat {code:?}");
                return Err(HallError::InvalidSeat { seat: code });
            };
            if let Some(holder) = seat.booked_by() {
                log::warn!("Booking rejected: {code} already held by {holder}");
                return Err(HallError::AlreadyBooked { seat: code, holder: holder.to_string() });
            }
            seat.booked_by = Some(customer.to_string());
            Booking {
                seat:     code.clone(),
                customer: customer.to_string(),
                price:    seat.price,
                is_vip:   seat.is_vip,
            }
        };

        if let Err(e) = self.save() {
            if let Some(seat) = self.seats.get_mut(&code) {
                seat.booked_by = None;
            }
            return Err(e);
        }

        log::info!("Booking confirmed: {} for {}", booking.seat, booking.customer);
        Ok(booking)
    }

    /// Clear every booking and persist the empty hall.
    pub fn reset(&mut self) -> HallResult<()> {
        let cleared = self.booked_count();
        self.initialize_fresh();
        self.save()?;
        log::warn!("System reset: cleared {cleared} bookings");
        Ok(())
    }

    /// Rewrite the backing store with the full seat map.
    pub fn save(&self) -> HallResult<()> {
        let records: Vec<SeatRecord> = self.seats_in_order().map(Seat::to_record).collect();
        self.store.write(&records)
    }

    pub fn seat(&self, code: &str) -> Option<&Seat> {
        self.seats.get(code)
    }

    pub fn config(&self) -> &HallConfig {
        &self.config
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn booked_count(&self) -> usize {
        self.seats.values().filter(|s| s.is_booked()).count()
    }

    /// Seats in row-major order: A1, A2, .., B1, ..
    pub fn seats_in_order(&self) -> impl Iterator<Item = &Seat> + '_ {
        self.grid().filter_map(|(_, row, col)| self.seats.get(&seat_code(row, col)))
    }

    /// Text seating chart, screen at the top.
    pub fn render_map(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = vec![rule.clone(), "       [  S C R E E N  ]".to_string(), rule.clone()];

        for index in 0..self.config.rows {
            let Some(row) = row_letter(index) else { break };
            let row_seats: Vec<&Seat> = (1..=self.config.cols)
                .filter_map(|col| self.seats.get(&seat_code(row, col)))
                .collect();
            let Some(first) = row_seats.first() else { continue };

            let symbols: Vec<String> = row_seats
                .iter()
                .map(|seat| {
                    if seat.is_booked() {
                        BOOKED_SYMBOL.to_string()
                    } else {
                        format!("[{}]", seat.code())
                    }
                })
                .collect();
            let label = if first.is_vip { "VIP" } else { "STD" };
            lines.push(format!("{} | {label}  ${:.2}", symbols.join(" "), first.price));
        }

        lines.push(rule);
        lines.push(format!("Booked: {}/{}", self.booked_count(), self.seat_count()));
        lines.join("\n")
    }

    fn grid(&self) -> impl Iterator<Item = (RowIndex, char, ColNumber)> + '_ {
        let cols = self.config.cols;
        (0..self.config.rows)
            .filter_map(row_letter_at)
            .flat_map(move |(index, row)| (1..=cols).map(move |col| (index, row, col)))
    }

    fn rebuild(&self, records: BTreeMap<SeatCode, SeatRecord>) -> HallResult<HashMap<SeatCode, Seat>> {
        let mut seats = HashMap::with_capacity(records.len());
        for (code, record) in records {
            let Some((row, col)) = parse_seat_code(&code) else {
                return Err(self.store.corrupt(format!("malformed seat code {code:?}")));
            };
            if record.id != code {
                return Err(self.store.corrupt(format!("entry {code} carries id {:?}", record.id)));
            }
            if record.is_booked != record.booked_by.is_some() {
                return Err(self.store.corrupt(format!(
                    "seat {code}: is_booked={} disagrees with booked_by={:?}",
                    record.is_booked, record.booked_by
                )));
            }
            let mut seat = Seat::new(row, col, record.price, record.is_vip);
            seat.booked_by = record.booked_by;
            seats.insert(code, seat);
        }

        let covers_grid = seats.len() == self.config.seat_count()
            && self.grid().all(|(_, row, col)| seats.contains_key(&seat_code(row, col)));
        if !covers_grid {
            return Err(self.store.corrupt(format!(
                "{} stored seats do not match the configured {}x{} grid",
                seats.len(),
                self.config.rows,
                self.config.cols
            )));
        }
        Ok(seats)
    }
}

fn row_letter_at(index: RowIndex) -> Option<(RowIndex, char)> {
    row_letter(index).map(|row| (index, row))
}
