//! Guest lookup: match a cedula across administration reservations and web
//! booking requests and return one list, newest first.

use crate::cedula::Cedula;
use crate::date;
use crate::error::{HotelError, Result};
use crate::lenient::present;
use crate::record::{AdminReservation, StayRecord, WebRequest};
use crate::repository::Repository;
use crate::status::{ReservationStatus, ESTADO_PENDIENTE};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Reverse;
use std::fmt;

pub const ORIGIN_ADMIN: &str = "Administración";
pub const ORIGIN_WEB: &str = "Web";

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Entered by the administration.
    Reserva,
    /// Submitted from the public site, not yet reviewed.
    Solicitud,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Reserva => "reserva",
            RecordKind::Solicitud => "solicitud",
        })
    }
}

// ---------------------------------------------------------------------------
// MergedRecord
// ---------------------------------------------------------------------------

/// One lookup row. `estado` and `origen` are always resolved; `cliente`,
/// `correo` and `tipo_habitacion` carry the normalized value of their aliases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub tipo: RecordKind,
    /// Position in the source collection; the display key when `id` is unset.
    pub source_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub cedula: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    pub estado: String,
    pub origen: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingreso: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salida: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_habitacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_habitacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adultos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ninos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MergedRecord {
    fn from_stay(
        tipo: RecordKind,
        source_index: usize,
        cedula: &Cedula,
        stay: &StayRecord,
        cliente: Option<String>,
        origen: String,
    ) -> Self {
        Self {
            tipo,
            source_index,
            id: stay.id.clone(),
            cedula: cedula.to_string(),
            cliente,
            nombre: stay.nombre.clone(),
            estado: present(&stay.estado).unwrap_or(ESTADO_PENDIENTE).to_string(),
            origen,
            ingreso: stay.ingreso.clone(),
            salida: stay.salida.clone(),
            tipo_habitacion: stay.room_type().map(str::to_string),
            numero_habitacion: stay.numero_habitacion.clone(),
            adultos: stay.adultos,
            ninos: stay.ninos,
            correo: stay.email().map(str::to_string),
            campo: stay.campo.clone(),
            fecha_creacion: stay.fecha_creacion.clone(),
            extra: stay.extra.clone(),
        }
    }

    pub fn from_admin(index: usize, cedula: &Cedula, r: &AdminReservation) -> Self {
        let cliente = present(&r.cliente).or(present(&r.nombre)).map(str::to_string);
        let origen = present(&r.origen).unwrap_or(ORIGIN_ADMIN).to_string();
        Self::from_stay(RecordKind::Reserva, index, cedula, r, cliente, origen)
    }

    pub fn from_web(index: usize, cedula: &Cedula, s: &WebRequest) -> Self {
        let cliente = present(&s.nombre).or(present(&s.cliente)).map(str::to_string);
        Self::from_stay(RecordKind::Solicitud, index, cedula, s, cliente, ORIGIN_WEB.to_string())
    }

    pub fn effective_date(&self) -> DateTime<Utc> {
        date::effective_date(self.fecha_creacion.as_deref(), self.ingreso.as_deref())
    }

    pub fn status(&self) -> ReservationStatus {
        ReservationStatus::from_estado(Some(&self.estado))
    }

    pub fn display_key(&self) -> String {
        self.id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.source_index.to_string())
    }

    /// Older web requests were tagged "Solicitud Web"; guests see "Reserva Web".
    pub fn origin_label(&self) -> &str {
        match self.origen.as_str() {
            "Solicitud Web" => "Reserva Web",
            other => other,
        }
    }

    pub fn adults_or_default(&self) -> u32 {
        self.adultos.filter(|n| *n > 0).unwrap_or(1)
    }

    pub fn children_or_default(&self) -> u32 {
        self.ninos.unwrap_or(0)
    }

    pub fn is_pending_request(&self) -> bool {
        self.tipo == RecordKind::Solicitud
    }
}

// ---------------------------------------------------------------------------
// LookupResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupNotice {
    NoRecordsFound,
}

impl LookupNotice {
    pub fn to_error(self) -> HotelError {
        match self {
            LookupNotice::NoRecordsFound => HotelError::NoRecordsFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    pub cedula: Cedula,
    pub records: Vec<MergedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<LookupNotice>,
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reservation_count(&self) -> usize {
        self.records.iter().filter(|r| r.tipo == RecordKind::Reserva).count()
    }

    pub fn request_count(&self) -> usize {
        self.records.iter().filter(|r| r.tipo == RecordKind::Solicitud).count()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Merge every reservation and web request filed under `identifier`.
///
/// Fails with `InvalidIdentifier` before looking at either slice when the
/// identifier is not ten ASCII digits. An empty result is not an error: it
/// comes back with `LookupNotice::NoRecordsFound`.
pub fn lookup(
    identifier: &str,
    admin_reservations: &[AdminReservation],
    web_requests: &[WebRequest],
) -> Result<LookupResult> {
    let cedula = Cedula::parse(identifier)?;
    Ok(merge(cedula, admin_reservations, web_requests))
}

/// Repository-backed lookup. Storage is read only after the identifier
/// validates; malformed collections count as empty.
pub fn lookup_in<S: KeyValueStore>(repo: &Repository<S>, identifier: &str) -> Result<LookupResult> {
    let cedula = Cedula::parse(identifier)?;
    let admin = repo.admin_reservations()?;
    let web = repo.web_requests()?;
    Ok(merge(cedula, &admin.records, &web.records))
}

fn merge(
    cedula: Cedula,
    admin_reservations: &[AdminReservation],
    web_requests: &[WebRequest],
) -> LookupResult {
    let admin = admin_reservations
        .iter()
        .enumerate()
        .filter(|(_, r)| r.matches_cedula(cedula.as_str()))
        .map(|(i, r)| MergedRecord::from_admin(i, &cedula, r));
    let web = web_requests
        .iter()
        .enumerate()
        .filter(|(_, s)| s.matches_cedula(cedula.as_str()))
        .map(|(i, s)| MergedRecord::from_web(i, &cedula, s));

    let mut records: Vec<MergedRecord> = admin.chain(web).collect();
    // Stable: ties keep admin-before-web and source order.
    records.sort_by_key(|r| Reverse(r.effective_date()));

    tracing::debug!(cedula = %cedula, matches = records.len(), "reservation lookup");

    let notice = records.is_empty().then_some(LookupNotice::NoRecordsFound);
    LookupResult {
        cedula,
        records,
        notice,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
