use crate::cmd::open_repo;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use hotel_core::{
    booking::{submit_request, BookingForm},
    dashboard::pending_requests,
    date::format_date,
    record::WebRequest,
    status::ReservationStatus,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum RequestSubcommand {
    /// Submit a booking request as a guest would from the public site
    Create {
        /// Contact email
        #[arg(long)]
        email: String,
        /// 10-digit national ID
        #[arg(long)]
        cedula: String,
        /// Guest full name
        #[arg(long)]
        name: String,
        /// Room type (e.g. Simple, Doble, Suite)
        #[arg(long)]
        room_type: Option<String>,
        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: Option<String>,
        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: Option<String>,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
    },
    /// List booking requests
    List {
        /// Only requests still awaiting review
        #[arg(long)]
        pending: bool,
    },
}

pub fn run(root: &Path, subcmd: RequestSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RequestSubcommand::Create {
            email,
            cedula,
            name,
            room_type,
            check_in,
            check_out,
            adults,
            children,
        } => {
            let form = BookingForm {
                correo: email,
                cedula,
                nombre: name,
                tipo_habitacion: room_type,
                ingreso: check_in,
                salida: check_out,
                adultos: adults,
                ninos: children,
            };
            create(root, form, json)
        }
        RequestSubcommand::List { pending } => list(root, pending, json),
    }
}

fn create(root: &Path, form: BookingForm, json: bool) -> anyhow::Result<()> {
    let repo = open_repo(root)?;
    let request = submit_request(&repo, form, chrono::Utc::now())
        .context("booking request rejected")?;

    if json {
        print_json(&request)?;
        return Ok(());
    }

    let cedula = request.cedula.as_deref().unwrap_or_default();
    println!("Booking request saved.");
    println!();
    println!("Keep your cedula: {cedula}");
    println!("Check the status of your request any time with:");
    println!("  hotel lookup {cedula}");
    println!("You will be contacted once the administration reviews it.");
    Ok(())
}

fn list(root: &Path, pending: bool, json: bool) -> anyhow::Result<()> {
    let repo = open_repo(root)?;
    let all = repo.web_requests().context("failed to read booking requests")?.records;
    let requests: Vec<&WebRequest> = if pending {
        pending_requests(&all)
    } else {
        all.iter().collect()
    };

    if json {
        print_json(&requests)?;
        return Ok(());
    }

    if requests.is_empty() {
        let scope = if pending { "pending " } else { "" };
        println!("No {scope}booking requests.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = requests
        .iter()
        .map(|s| {
            vec![
                or_dash(s.cedula.as_deref()),
                or_dash(s.nombre.as_deref().or(s.cliente.as_deref())),
                or_dash(s.room_type()),
                format!(
                    "{} -> {}",
                    format_date(s.ingreso.as_deref()),
                    format_date(s.salida.as_deref())
                ),
                ReservationStatus::from_estado(s.estado.as_deref()).to_string(),
                format_date(s.fecha_creacion.as_deref()),
            ]
        })
        .collect();
    print_table(&["CEDULA", "NAME", "ROOM", "DATES", "STATUS", "CREATED"], rows);
    Ok(())
}
