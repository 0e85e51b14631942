//! A single seat and its on-disk view.

use crate::types::{seat_code, ColNumber, SeatCode};
use serde::{Deserialize, Serialize};

/// One seat in the hall. Identity and pricing are fixed at creation;
/// only the booking holder changes, and only through [`crate::hall::Hall`].
#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    pub row:    char,
    pub col:    ColNumber,
    pub price:  f64,
    pub is_vip: bool,
    pub(crate) booked_by: Option<String>,
}

impl Seat {
    pub fn new(row: char, col: ColNumber, price: f64, is_vip: bool) -> Self {
        Self { row, col, price, is_vip, booked_by: None }
    }

    pub fn code(&self) -> SeatCode {
        seat_code(self.row, self.col)
    }

    pub fn is_booked(&self) -> bool {
        self.booked_by.is_some()
    }

    pub fn booked_by(&self) -> Option<&str> {
        self.booked_by.as_deref()
    }

    /// "VIP" or "Standard", as printed on tickets.
    pub fn category(&self) -> &'static str {
        if self.is_vip { "VIP" } else { "Standard" }
    }

    pub fn to_record(&self) -> SeatRecord {
        SeatRecord {
            id:        self.code(),
            price:     self.price,
            is_vip:    self.is_vip,
            is_booked: self.is_booked(),
            booked_by: self.booked_by.clone(),
        }
    }
}

/// Serialization view of a seat, one entry per key in the backing store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatRecord {
    pub id:        SeatCode,
    pub price:     f64,
    pub is_vip:    bool,
    pub is_booked: bool,
    pub booked_by: Option<String>,
}
