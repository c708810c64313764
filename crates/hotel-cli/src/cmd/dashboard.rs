use crate::cmd::open_repo;
use crate::output::{print_fields, print_json};
use anyhow::Context;
use hotel_core::{config::Config, dashboard};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let repo = open_repo(root)?;
    let stats = dashboard::load(&repo).context("failed to compute statistics")?;

    if json {
        return print_json(&stats);
    }

    println!("{} dashboard", config.hotel.name);
    println!();
    println!("Rooms");
    print_fields(
        2,
        &[
            ("Total", stats.rooms_total.to_string()),
            ("Available", stats.rooms_available.to_string()),
            ("Occupied", stats.rooms_occupied.to_string()),
            ("Occupancy", format!("{}%", stats.occupancy_rate)),
        ],
    );
    println!("Reservations");
    print_fields(
        2,
        &[
            ("Total", stats.reservations_total.to_string()),
            ("Confirmed", stats.reservations_confirmed.to_string()),
        ],
    );
    println!("Clients");
    print_fields(2, &[("Total", stats.clients_total.to_string())]);
    println!("Web requests");
    print_fields(2, &[("Pending", stats.pending_requests.to_string())]);
    Ok(())
}
