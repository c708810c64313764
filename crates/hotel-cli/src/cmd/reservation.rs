use crate::cmd::open_repo;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use hotel_core::{
    booking::{add_reservation, ReservationForm},
    date::format_date,
    lenient::present,
    lookup::ORIGIN_ADMIN,
    status::ReservationStatus,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum ReservationSubcommand {
    /// Record a reservation on behalf of a guest
    Add {
        /// 10-digit national ID
        #[arg(long)]
        cedula: String,
        /// Guest full name
        #[arg(long)]
        name: String,
        /// Confirmada, Pendiente, Completada or Cancelada (default: Pendiente)
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        room_type: Option<String>,
        #[arg(long)]
        room_number: Option<String>,
        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: Option<String>,
        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: Option<String>,
        #[arg(long)]
        adults: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
    },
    /// List administration reservations
    List,
}

pub fn run(root: &Path, subcmd: ReservationSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ReservationSubcommand::Add {
            cedula,
            name,
            status,
            email,
            room_type,
            room_number,
            check_in,
            check_out,
            adults,
            children,
        } => {
            let form = ReservationForm {
                cedula,
                cliente: name,
                estado: status,
                correo: email,
                tipo_habitacion: room_type,
                numero_habitacion: room_number,
                ingreso: check_in,
                salida: check_out,
                adultos: adults,
                ninos: children,
            };
            add(root, form, json)
        }
        ReservationSubcommand::List => list(root, json),
    }
}

fn add(root: &Path, form: ReservationForm, json: bool) -> anyhow::Result<()> {
    let repo = open_repo(root)?;
    let reservation =
        add_reservation(&repo, form, chrono::Utc::now()).context("reservation rejected")?;

    if json {
        print_json(&reservation)?;
    } else {
        println!(
            "Added reservation [{}] for {} ({}).",
            reservation.id.as_deref().unwrap_or_default(),
            reservation.cliente.as_deref().unwrap_or_default(),
            ReservationStatus::from_estado(reservation.estado.as_deref()),
        );
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let repo = open_repo(root)?;
    let reservations = repo
        .admin_reservations()
        .context("failed to read reservations")?
        .records;

    if json {
        print_json(&reservations)?;
        return Ok(());
    }

    if reservations.is_empty() {
        println!("No reservations.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = reservations
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                present(&r.id).map(str::to_string).unwrap_or_else(|| i.to_string()),
                or_dash(r.cedula.as_deref()),
                or_dash(present(&r.cliente).or(present(&r.nombre))),
                or_dash(r.room_type()),
                or_dash(r.numero_habitacion.as_deref()),
                format!(
                    "{} -> {}",
                    format_date(r.ingreso.as_deref()),
                    format_date(r.salida.as_deref())
                ),
                ReservationStatus::from_estado(r.estado.as_deref()).to_string(),
                present(&r.origen).unwrap_or(ORIGIN_ADMIN).to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "CEDULA", "GUEST", "ROOM", "NO.", "DATES", "STATUS", "ORIGIN"],
        rows,
    );
    Ok(())
}
