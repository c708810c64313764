use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse the date strings the booking pages store.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and bare `YYYY-MM-DD`
/// (UTC midnight). Anything else is `None`.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort key of a stay: creation time, else check-in, else the Unix epoch.
pub fn effective_date(fecha_creacion: Option<&str>, ingreso: Option<&str>) -> DateTime<Utc> {
    fecha_creacion
        .and_then(parse_date)
        .or_else(|| ingreso.and_then(parse_date))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// `DD/MM/YYYY` for display. Unparseable input is echoed back unchanged.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.filter(|s| !s.trim().is_empty()) {
        None => "Not specified".to_string(),
        Some(s) => match parse_date(s) {
            Some(dt) => dt.format("%d/%m/%Y").to_string(),
            None => s.to_string(),
        },
    }
}

/// Creation timestamp in the shape `Date.toISOString()` produces.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_supported_shapes() {
        let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-05-01"), Some(midnight));
        assert_eq!(parse_date("2024-05-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_date("2024-05-01T00:00"), Some(midnight));
        assert_eq!(parse_date("2024-05-01T00:00:00.000"), Some(midnight));
        assert_eq!(
            parse_date("2024-05-01T02:00:00+02:00"),
            Some(midnight)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("mañana"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn effective_date_fallbacks() {
        let created = Utc.with_ymd_and_hms(2024, 4, 20, 10, 0, 0).unwrap();
        let checkin = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(
            effective_date(Some("2024-04-20T10:00:00Z"), Some("2024-05-01")),
            created
        );
        assert_eq!(effective_date(None, Some("2024-05-01")), checkin);
        assert_eq!(effective_date(Some("not a date"), Some("2024-05-01")), checkin);
        assert_eq!(effective_date(None, None), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn format_for_display() {
        assert_eq!(format_date(Some("2024-05-01")), "01/05/2024");
        assert_eq!(format_date(None), "Not specified");
        assert_eq!(format_date(Some("")), "Not specified");
        assert_eq!(format_date(Some("soon")), "soon");
    }

    #[test]
    fn timestamp_matches_iso_string() {
        let t = Utc.with_ymd_and_hms(2024, 4, 21, 9, 0, 0).unwrap();
        assert_eq!(timestamp(t), "2024-04-21T09:00:00.000Z");
    }
}
