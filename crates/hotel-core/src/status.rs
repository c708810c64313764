use std::fmt;

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Stored value for a request nobody has reviewed yet.
pub const ESTADO_PENDIENTE: &str = "Pendiente";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn all() -> &'static [ReservationStatus] {
        &[
            ReservationStatus::Confirmed,
            ReservationStatus::Pending,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ]
    }

    /// Total mapping from a stored `estado`; unknown or absent values read as pending.
    pub fn from_estado(estado: Option<&str>) -> Self {
        estado.and_then(Self::parse_estado).unwrap_or(ReservationStatus::Pending)
    }

    /// Strict, case-insensitive parse of a stored `estado`.
    pub fn parse_estado(estado: &str) -> Option<Self> {
        match estado.to_lowercase().as_str() {
            "confirmada" => Some(ReservationStatus::Confirmed),
            "pendiente" => Some(ReservationStatus::Pending),
            "completada" => Some(ReservationStatus::Completed),
            "cancelada" => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }

    /// Value written to storage.
    pub fn as_estado(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "Confirmada",
            ReservationStatus::Pending => ESTADO_PENDIENTE,
            ReservationStatus::Completed => "Completada",
            ReservationStatus::Cancelled => "Cancelada",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            ReservationStatus::Confirmed => StatusColor::Green,
            ReservationStatus::Pending => StatusColor::Amber,
            ReservationStatus::Completed => StatusColor::Blue,
            ReservationStatus::Cancelled => StatusColor::Red,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StatusColor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Amber,
    Blue,
    Red,
}

impl StatusColor {
    pub fn name(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Amber => "amber",
            StatusColor::Blue => "blue",
            StatusColor::Red => "red",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            StatusColor::Green => "#2ecc71",
            StatusColor::Amber => "#f39c12",
            StatusColor::Blue => "#3498db",
            StatusColor::Red => "#e74c3c",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_case_insensitive() {
        for raw in ["confirmada", "Confirmada", "CONFIRMADA"] {
            let s = ReservationStatus::from_estado(Some(raw));
            assert_eq!(s.label(), "Confirmed");
            assert_eq!(s.color(), StatusColor::Green);
        }
        assert_eq!(ReservationStatus::from_estado(Some("cancelada")).color().hex(), "#e74c3c");
        assert_eq!(ReservationStatus::from_estado(Some("Completada")).label(), "Completed");
    }

    #[test]
    fn mapping_is_total() {
        for raw in [None, Some(""), Some("en revisión"), Some(" confirmada")] {
            let s = ReservationStatus::from_estado(raw);
            assert_eq!(s.label(), "Pending");
            assert_eq!(s.color().name(), "amber");
        }
    }

    #[test]
    fn estado_roundtrip() {
        for s in ReservationStatus::all() {
            assert_eq!(ReservationStatus::parse_estado(s.as_estado()), Some(*s));
        }
    }
}
