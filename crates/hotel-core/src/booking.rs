//! Intake for booking requests submitted from the public site and for
//! records entered by the administration.

use crate::cedula::Cedula;
use crate::date;
use crate::error::{HotelError, Result};
use crate::lookup::ORIGIN_ADMIN;
use crate::record::{AdminReservation, Client, Room, StayRecord, WebRequest};
use crate::repository::Repository;
use crate::status::{ReservationStatus, ESTADO_PENDIENTE};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"\w+([-+.]\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*").unwrap()
    })
}

/// Loose check: the address must contain something shaped like `user@host.tld`.
pub fn validate_email(email: &str) -> Result<()> {
    if email_re().is_match(email) {
        Ok(())
    } else {
        Err(HotelError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(HotelError::InvalidName);
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// BookingForm
// ---------------------------------------------------------------------------

/// What a guest fills in on the public booking form.
#[derive(Debug, Clone)]
pub struct BookingForm {
    pub correo: String,
    pub cedula: String,
    pub nombre: String,
    pub tipo_habitacion: Option<String>,
    pub ingreso: Option<String>,
    pub salida: Option<String>,
    pub adultos: u32,
    pub ninos: u32,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            correo: String::new(),
            cedula: String::new(),
            nombre: String::new(),
            tipo_habitacion: None,
            ingreso: None,
            salida: None,
            adultos: 1,
            ninos: 0,
        }
    }
}

impl BookingForm {
    /// Checks run in the order the form reports them: email, cedula, name.
    pub fn validate(&self) -> Result<Cedula> {
        validate_email(&self.correo)?;
        let cedula = Cedula::parse(self.cedula.trim())?;
        validate_name(&self.nombre)?;
        Ok(cedula)
    }

    /// Build the stored request. The room type goes under `tipo`, the key
    /// the public form has always used.
    pub fn into_request(self, now: DateTime<Utc>) -> Result<WebRequest> {
        let cedula = self.validate()?;
        Ok(WebRequest(StayRecord {
            correo: Some(self.correo),
            cedula: Some(cedula.to_string()),
            nombre: Some(self.nombre),
            tipo: non_blank(self.tipo_habitacion),
            ingreso: non_blank(self.ingreso),
            salida: non_blank(self.salida),
            adultos: Some(self.adultos),
            ninos: Some(self.ninos),
            estado: Some(ESTADO_PENDIENTE.to_string()),
            fecha_creacion: Some(date::timestamp(now)),
            ..Default::default()
        }))
    }
}

/// Validate a guest form and append it to the web requests.
pub fn submit_request<S: KeyValueStore>(
    repo: &Repository<S>,
    form: BookingForm,
    now: DateTime<Utc>,
) -> Result<WebRequest> {
    let request = form.into_request(now)?;
    repo.append_web_request(&request)?;
    tracing::info!(cedula = request.cedula.as_deref().unwrap_or_default(), "booking request stored");
    Ok(request)
}

// ---------------------------------------------------------------------------
// ReservationForm
// ---------------------------------------------------------------------------

/// A reservation keyed in by the administration.
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub cedula: String,
    pub cliente: String,
    pub estado: Option<String>,
    pub correo: Option<String>,
    pub tipo_habitacion: Option<String>,
    pub numero_habitacion: Option<String>,
    pub ingreso: Option<String>,
    pub salida: Option<String>,
    pub adultos: Option<u32>,
    pub ninos: Option<u32>,
}

/// Append an administration reservation. The id is one past the highest
/// numeric id already stored; `estado` must be one of the four known values
/// and is stored in its canonical spelling.
pub fn add_reservation<S: KeyValueStore>(
    repo: &Repository<S>,
    form: ReservationForm,
    now: DateTime<Utc>,
) -> Result<AdminReservation> {
    let cedula = Cedula::parse(form.cedula.trim())?;
    validate_name(&form.cliente)?;
    let status = match non_blank(form.estado) {
        None => ReservationStatus::Pending,
        Some(raw) => ReservationStatus::parse_estado(raw.trim())
            .ok_or(HotelError::InvalidStatus(raw))?,
    };
    if let Some(email) = non_blank(form.correo.clone()) {
        validate_email(&email)?;
    }

    let existing = repo.admin_reservations()?.records;
    let next_id = existing
        .iter()
        .filter_map(|r| r.id.as_deref().and_then(|id| id.parse::<u64>().ok()))
        .max()
        .unwrap_or(0)
        + 1;

    let reservation = AdminReservation(StayRecord {
        id: Some(next_id.to_string()),
        cedula: Some(cedula.to_string()),
        cliente: Some(form.cliente),
        estado: Some(status.as_estado().to_string()),
        correo: non_blank(form.correo),
        tipo_habitacion: non_blank(form.tipo_habitacion),
        numero_habitacion: non_blank(form.numero_habitacion),
        ingreso: non_blank(form.ingreso),
        salida: non_blank(form.salida),
        adultos: form.adultos,
        ninos: form.ninos,
        fecha_creacion: Some(date::timestamp(now)),
        origen: Some(ORIGIN_ADMIN.to_string()),
        ..Default::default()
    });
    repo.append_admin_reservation(&reservation)?;
    tracing::info!(id = next_id, status = %status, "reservation stored");
    Ok(reservation)
}

pub fn add_room<S: KeyValueStore>(repo: &Repository<S>, room: Room) -> Result<Room> {
    repo.append_room(&room)?;
    Ok(room)
}

pub fn add_client<S: KeyValueStore>(repo: &Repository<S>, client: Client) -> Result<Client> {
    if let Some(raw) = client.cedula.as_deref() {
        Cedula::parse(raw)?;
    }
    if let Some(name) = client.nombre.as_deref() {
        validate_name(name)?;
    }
    repo.append_client(&client)?;
    Ok(client)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
