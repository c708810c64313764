use crate::lenient::{self, present};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

// ---------------------------------------------------------------------------
// StayRecord
// ---------------------------------------------------------------------------

/// Field set shared by administration reservations and web booking requests.
///
/// Keys follow the stored JSON (`tipoHabitacion`, `fechaCreacion`, ...). Keys
/// this type does not know about land in `extra` and are written back as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRecord {
    #[serde(default, deserialize_with = "lenient::opt_ident", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_ident", skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub cliente: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub ingreso: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub salida: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub tipo_habitacion: Option<String>,
    /// Room type as the public booking form stored it.
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_ident", skip_serializing_if = "Option::is_none")]
    pub numero_habitacion: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_count", skip_serializing_if = "Option::is_none")]
    pub adultos: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_count", skip_serializing_if = "Option::is_none")]
    pub ninos: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    /// Legacy name of the email field on the booking form.
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub campo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub origen: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StayRecord {
    pub fn matches_cedula(&self, cedula: &str) -> bool {
        present(&self.cedula) == Some(cedula)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.correo).or(present(&self.campo))
    }

    pub fn room_type(&self) -> Option<&str> {
        present(&self.tipo_habitacion).or(present(&self.tipo))
    }
}

// ---------------------------------------------------------------------------
// AdminReservation / WebRequest
// ---------------------------------------------------------------------------

/// A reservation entered or confirmed through the administration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminReservation(pub StayRecord);

/// An unreviewed booking request submitted through the public site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebRequest(pub StayRecord);

macro_rules! stay_wrapper {
    ($ty:ident) => {
        impl Deref for $ty {
            type Target = StayRecord;

            fn deref(&self) -> &StayRecord {
                &self.0
            }
        }

        impl DerefMut for $ty {
            fn deref_mut(&mut self) -> &mut StayRecord {
                &mut self.0
            }
        }

        impl From<StayRecord> for $ty {
            fn from(record: StayRecord) -> Self {
                Self(record)
            }
        }
    };
}

stay_wrapper!(AdminReservation);
stay_wrapper!(WebRequest);

// ---------------------------------------------------------------------------
// Room / Client
// ---------------------------------------------------------------------------

pub const ROOM_AVAILABLE: &str = "Disponible";
pub const ROOM_OCCUPIED: &str = "Ocupada";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default, deserialize_with = "lenient::opt_ident", skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, deserialize_with = "lenient::opt_ident", skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_stored_admin_reservation() {
        let json = r#"{
            "id": 7,
            "cedula": 1234567890,
            "cliente": "Ana Mera",
            "estado": "Confirmada",
            "ingreso": "2024-05-01",
            "salida": "2024-05-03",
            "tipoHabitacion": "Suite",
            "numeroHabitacion": 204,
            "adultos": "2",
            "ninos": 1,
            "fechaCreacion": "2024-04-20T10:00:00Z",
            "observaciones": "late arrival"
        }"#;
        let r: AdminReservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.id.as_deref(), Some("7"));
        assert!(r.matches_cedula("1234567890"));
        assert_eq!(r.room_type(), Some("Suite"));
        assert_eq!(r.numero_habitacion.as_deref(), Some("204"));
        assert_eq!(r.adultos, Some(2));
        assert_eq!(r.extra["observaciones"], "late arrival");
    }

    #[test]
    fn unknown_fields_survive_a_write() {
        let json = r#"{"cedula":"1234567890","nombre":"Ana","telefono":"0999"}"#;
        let r: WebRequest = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["telefono"], "0999");
        assert_eq!(back["nombre"], "Ana");
        assert!(back.get("estado").is_none());
    }

    #[test]
    fn email_falls_back_to_campo() {
        let r: WebRequest = serde_json::from_str(r#"{"campo":"a@b.ec"}"#).unwrap();
        assert_eq!(r.email(), Some("a@b.ec"));
        let r: WebRequest =
            serde_json::from_str(r#"{"correo":"x@y.ec","campo":"a@b.ec"}"#).unwrap();
        assert_eq!(r.email(), Some("x@y.ec"));
    }

    #[test]
    fn web_form_tipo_is_room_type() {
        let r: WebRequest = serde_json::from_str(r#"{"tipo":"Doble"}"#).unwrap();
        assert_eq!(r.room_type(), Some("Doble"));
    }

    #[test]
    fn empty_cedula_never_matches() {
        let r = StayRecord {
            cedula: Some(String::new()),
            ..Default::default()
        };
        assert!(!r.matches_cedula(""));
    }
}
