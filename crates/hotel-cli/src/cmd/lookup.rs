use crate::output::{print_fields, print_json};
use anyhow::Context;
use hotel_core::{
    cedula::Cedula,
    config::Config,
    date::format_date,
    lookup::{lookup_in, MergedRecord},
    repository::Repository,
    store::FileStore,
};
use std::path::Path;
use std::time::Duration;

pub fn run(root: &Path, raw: &str, no_delay: bool, json: bool) -> anyhow::Result<()> {
    // Reject a malformed cedula before touching any stored data.
    Cedula::parse(raw)?;

    // An uninitialized root has no collections, so the lookup comes back empty.
    let config = Config::load_or_default(root).context("failed to load config")?;
    let repo = Repository::new(FileStore::new(config.storage_dir(root)));

    if !json && !no_delay && config.lookup.search_delay_ms > 0 {
        eprintln!("Searching...");
        std::thread::sleep(Duration::from_millis(config.lookup.search_delay_ms));
    }

    let result = lookup_in(&repo, raw)?;

    if json {
        print_json(&result)?;
        return Ok(());
    }

    if let Some(notice) = result.notice {
        println!("{}: {}.", result.cedula, notice.to_error());
        println!("Check the number or submit a new booking request.");
        return Ok(());
    }

    println!("Reservations for {} ({})", result.cedula, result.records.len());
    for record in &result.records {
        println!();
        print_record(record);
    }
    Ok(())
}

fn print_record(r: &MergedRecord) {
    let status = r.status();
    let name = r.cliente.as_deref().unwrap_or("Guest");
    println!("[{}] {name}  {} ({})", r.display_key(), status.label(), status.color());

    let room = match (r.tipo_habitacion.as_deref(), r.numero_habitacion.as_deref()) {
        (Some(kind), Some(num)) => format!("{kind} (Room {num})"),
        (Some(kind), None) => kind.to_string(),
        (None, Some(num)) => format!("Not specified (Room {num})"),
        (None, None) => "Not specified".to_string(),
    };

    print_fields(
        4,
        &[
            (
                "Dates",
                format!(
                    "{} -> {}",
                    format_date(r.ingreso.as_deref()),
                    format_date(r.salida.as_deref())
                ),
            ),
            ("Room", room),
            (
                "Guests",
                format!(
                    "{} adult(s), {} child(ren)",
                    r.adults_or_default(),
                    r.children_or_default()
                ),
            ),
            (
                "Contact",
                r.correo.clone().unwrap_or_else(|| "Not specified".to_string()),
            ),
            ("Origin", r.origin_label().to_string()),
            ("Type", r.tipo.to_string()),
            (
                "Created",
                format_date(r.fecha_creacion.as_deref().or(r.ingreso.as_deref())),
            ),
        ],
    );

    if r.is_pending_request() {
        println!("    Note: this request is awaiting review by the hotel administration.");
    }
}
