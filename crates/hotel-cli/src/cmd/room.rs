use crate::cmd::open_repo;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use hotel_core::{
    booking::add_room,
    record::{Room, ROOM_AVAILABLE, ROOM_OCCUPIED},
};
use std::path::Path;

#[derive(Subcommand)]
pub enum RoomSubcommand {
    /// Add a room to the inventory
    Add {
        /// Room number (e.g. 204)
        number: String,
        /// Room type (e.g. Simple, Doble, Suite)
        #[arg(long = "type")]
        room_type: Option<String>,
        /// Mark the room as occupied instead of available
        #[arg(long)]
        occupied: bool,
    },
    /// List rooms
    List,
}

pub fn run(root: &Path, subcmd: RoomSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RoomSubcommand::Add {
            number,
            room_type,
            occupied,
        } => add(root, number, room_type, occupied, json),
        RoomSubcommand::List => list(root, json),
    }
}

fn add(
    root: &Path,
    number: String,
    room_type: Option<String>,
    occupied: bool,
    json: bool,
) -> anyhow::Result<()> {
    let repo = open_repo(root)?;
    let estado = if occupied { ROOM_OCCUPIED } else { ROOM_AVAILABLE };
    let room = add_room(
        &repo,
        Room {
            numero: Some(number),
            tipo: room_type,
            estado: Some(estado.to_string()),
            ..Default::default()
        },
    )
    .context("failed to add room")?;

    if json {
        print_json(&room)?;
    } else {
        println!(
            "Added room {} ({estado}).",
            room.numero.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let repo = open_repo(root)?;
    let rooms = repo.rooms().context("failed to read rooms")?.records;

    if json {
        print_json(&rooms)?;
        return Ok(());
    }

    if rooms.is_empty() {
        println!("No rooms.");
        return Ok(());
    }

    let rows = rooms
        .iter()
        .map(|r| {
            vec![
                or_dash(r.numero.as_deref()),
                or_dash(r.tipo.as_deref()),
                or_dash(r.estado.as_deref()),
            ]
        })
        .collect();
    print_table(&["NUMBER", "TYPE", "STATE"], rows);
    Ok(())
}
