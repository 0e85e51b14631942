//! box-office: interactive seat booking console for one theater hall.
//!
//! Usage:
//!   box-office
//!   box-office --config hall.json
//!   box-office --data-dir ./state --log ./state/audit.log
//!   box-office --db cinema_data.json --tickets ./tickets

use anyhow::{Context, Result};
use chrono::Local;
use cinema_core::{
    audit::{self, Tee},
    config::HallConfig,
    controller::BoxOffice,
    hall::Hall,
    ticket::TicketWriter,
};
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = HallConfig::from_args(&args)?;

    init_logging(&config.audit_log)?;
    let hall = Hall::open(config)?;

    let layout = hall.config();
    log::info!(
        "box-office starting: {}x{} hall, VIP from row {}, store {}, tickets {}",
        layout.rows,
        layout.cols,
        layout.vip_row_start,
        layout.db_file.display(),
        layout.ticket_dir.display()
    );
    let tickets = TicketWriter::new(layout.ticket_dir.clone())?;

    let stdin = io::stdin();
    let mut office = BoxOffice::new(hall, tickets, stdin.lock(), io::stdout());
    office.run()?;
    Ok(())
}

/// Every record goes to stderr and is appended to the audit log.
fn init_logging(audit_log: &Path) -> Result<()> {
    if let Some(parent) = audit_log.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(audit_log)
        .with_context(|| format!("opening audit log {}", audit_log.display()))?;

    let filter = audit::audit_filter(env::var("RUST_LOG").ok().as_deref());
    env_logger::Builder::new()
        .parse_filters(&filter)
        .format(|buf, record| {
            let line = audit::format_line(
                Local::now().naive_local(),
                record.level(),
                &record.args().to_string(),
            );
            writeln!(buf, "{line}")
        })
        .target(env_logger::Target::Pipe(Box::new(Tee::new(io::stderr(), file))))
        .init();
    Ok(())
}
