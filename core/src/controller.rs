//! The interactive box office loop.
//!
//! RULES:
//!   - One request/response cycle per menu choice; nothing runs in between.
//!   - Rejected bookings are printed and the loop continues.
//!   - Persistence and console failures end the loop with an error.
//!   - End of input at any prompt ends the session like Exit.

use crate::{
    command::MenuChoice,
    error::HallResult,
    hall::Hall,
    ticket::TicketWriter,
};
use std::io::{BufRead, Write};

enum Flow {
    Continue,
    Exit,
}

pub struct BoxOffice<R, W> {
    hall:    Hall,
    tickets: TicketWriter,
    input:   R,
    output:  W,
}

impl<R: BufRead, W: Write> BoxOffice<R, W> {
    pub fn new(hall: Hall, tickets: TicketWriter, input: R, output: W) -> Self {
        Self { hall, tickets, input, output }
    }

    pub fn hall(&self) -> &Hall {
        &self.hall
    }

    /// Consume the controller and hand back its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the operator exits or input ends.
    pub fn run(&mut self) -> HallResult<()> {
        loop {
            writeln!(self.output, "\n--- CINEMA BOOKING SYSTEM ---")?;
            for choice in MenuChoice::ALL {
                writeln!(self.output, "{}. {}", choice.key(), choice.label())?;
            }

            let Some(line) = self.prompt("Enter choice: ")? else { break };
            let flow = match MenuChoice::parse(&line) {
                Some(MenuChoice::ViewMap) => self.show_map()?,
                Some(MenuChoice::Book)    => self.book()?,
                Some(MenuChoice::Reset)   => self.reset()?,
                Some(MenuChoice::Exit)    => Flow::Exit,
                None => {
                    writeln!(self.output, "Invalid option.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                break;
            }
        }
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_map(&mut self) -> HallResult<Flow> {
        writeln!(self.output, "\n{}\n", self.hall.render_map())?;
        Ok(Flow::Continue)
    }

    fn book(&mut self) -> HallResult<Flow> {
        self.show_map()?;
        let Some(seat_id) = self.prompt("Enter Seat Number (e.g., A1): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Enter Customer Name: ")? else {
            return Ok(Flow::Exit);
        };

        match self.hall.book_seat(&seat_id, &name) {
            Ok(booking) => {
                writeln!(
                    self.output,
                    "\n>> Success! Seat {} booked for ${:.2}",
                    booking.seat, booking.price
                )?;
                let path = self.tickets.generate_ticket(&self.hall, &booking.customer, &booking.seat)?;
                writeln!(self.output, "\n[INFO] Receipt generated: {}", path.display())?;
            }
            Err(e) if e.is_rejection() => {
                writeln!(self.output, "\n>> {e}")?;
            }
            Err(e) => return Err(e),
        }
        Ok(Flow::Continue)
    }

    fn reset(&mut self) -> HallResult<Flow> {
        let Some(answer) = self.prompt("Are you sure you want to clear all bookings? (y/n): ")? else {
            return Ok(Flow::Exit);
        };
        if answer.eq_ignore_ascii_case("y") {
            self.hall.reset()?;
            writeln!(self.output, "System reset complete.")?;
        } else {
            writeln!(self.output, "Reset cancelled.")?;
        }
        Ok(Flow::Continue)
    }

    /// Print `text` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> HallResult<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
