//! Seat reservations for a single theater hall.
//!
//! The hall owns every seat and persists the full seat map to a JSON file
//! after each change. Completed bookings get a plain-text receipt.

pub mod audit;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod hall;
pub mod seat;
pub mod store;
pub mod ticket;
pub mod types;
