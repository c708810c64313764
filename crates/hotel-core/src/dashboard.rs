use crate::error::Result;
use crate::lenient::present;
use crate::record::{AdminReservation, Client, Room, WebRequest, ROOM_AVAILABLE, ROOM_OCCUPIED};
use crate::repository::Repository;
use crate::status::ESTADO_PENDIENTE;
use crate::store::KeyValueStore;
use serde::Serialize;

/// Headline numbers for the administration dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub rooms_total: usize,
    pub rooms_available: usize,
    pub rooms_occupied: usize,
    pub reservations_total: usize,
    pub reservations_confirmed: usize,
    pub clients_total: usize,
    pub pending_requests: usize,
    /// Occupied rooms as a whole percentage of all rooms.
    pub occupancy_rate: u32,
}

/// Web requests still waiting for review: `estado` unset or exactly "Pendiente".
pub fn pending_requests(requests: &[WebRequest]) -> Vec<&WebRequest> {
    requests
        .iter()
        .filter(|s| present(&s.estado).map_or(true, |e| e == ESTADO_PENDIENTE))
        .collect()
}

pub fn compute(
    rooms: &[Room],
    reservations: &[AdminReservation],
    clients: &[Client],
    requests: &[WebRequest],
) -> DashboardStats {
    let room_in = |state: &str| {
        rooms
            .iter()
            .filter(|r| r.estado.as_deref() == Some(state))
            .count()
    };
    let rooms_occupied = room_in(ROOM_OCCUPIED);
    let occupancy_rate = if rooms.is_empty() {
        0
    } else {
        (rooms_occupied as f64 / rooms.len() as f64 * 100.0).round() as u32
    };

    DashboardStats {
        rooms_total: rooms.len(),
        rooms_available: room_in(ROOM_AVAILABLE),
        rooms_occupied,
        reservations_total: reservations.len(),
        reservations_confirmed: reservations
            .iter()
            .filter(|r| r.estado.as_deref() == Some("Confirmada"))
            .count(),
        clients_total: clients.len(),
        pending_requests: pending_requests(requests).len(),
        occupancy_rate,
    }
}

pub fn load<S: KeyValueStore>(repo: &Repository<S>) -> Result<DashboardStats> {
    let rooms = repo.rooms()?.records;
    let reservations = repo.admin_reservations()?.records;
    let clients = repo.clients()?.records;
    let requests = repo.web_requests()?.records;
    Ok(compute(&rooms, &reservations, &clients, &requests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{KEY_ROOMS, KEY_WEB_REQUESTS};
    use crate::store::MemoryStore;

    fn rooms(states: &[&str]) -> Vec<Room> {
        states
            .iter()
            .map(|s| Room {
                estado: Some(s.to_string()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn empty_hotel_has_zero_occupancy() {
        assert_eq!(compute(&[], &[], &[], &[]), DashboardStats::default());
    }

    #[test]
    fn occupancy_is_rounded_percentage() {
        let r = rooms(&["Ocupada", "Disponible", "Disponible", "Mantenimiento"]);
        let stats = compute(&r, &[], &[], &[]);
        assert_eq!(stats.rooms_total, 4);
        assert_eq!(stats.rooms_available, 2);
        assert_eq!(stats.rooms_occupied, 1);
        assert_eq!(stats.occupancy_rate, 25);

        let r = rooms(&["Ocupada", "Ocupada", "Disponible"]);
        assert_eq!(compute(&r, &[], &[], &[]).occupancy_rate, 67);
    }

    #[test]
    fn counts_confirmed_and_pending_exactly() {
        let reservations: Vec<AdminReservation> = [
            r#"{"estado":"Confirmada"}"#,
            r#"{"estado":"confirmada"}"#,
            r#"{}"#,
        ]
        .iter()
        .map(|j| serde_json::from_str(j).unwrap())
        .collect();
        let requests: Vec<WebRequest> = [
            r#"{"estado":"Pendiente"}"#,
            r#"{}"#,
            r#"{"estado":"Cancelada"}"#,
        ]
        .iter()
        .map(|j| serde_json::from_str(j).unwrap())
        .collect();
        let stats = compute(&[], &reservations, &[Client::default()], &requests);
        assert_eq!(stats.reservations_total, 3);
        assert_eq!(stats.reservations_confirmed, 1);
        assert_eq!(stats.clients_total, 1);
        assert_eq!(stats.pending_requests, 2);
    }

    #[test]
    fn load_reads_every_collection() {
        let store = MemoryStore::new()
            .with_entry(KEY_ROOMS, r#"[{"estado":"Ocupada"},{"estado":"Disponible"}]"#)
            .with_entry(KEY_WEB_REQUESTS, "not json");
        let stats = load(&Repository::new(store)).unwrap();
        assert_eq!(stats.rooms_total, 2);
        assert_eq!(stats.occupancy_rate, 50);
        assert_eq!(stats.pending_requests, 0);
    }
}
