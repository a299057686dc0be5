//! DTOs para el servicio Trip de OSRM
//! 
//! Este módulo define el esquema de respuesta de
//! `GET /trip/v1/{profile}/{coordenadas}`.

use serde::Deserialize;

/// Valor de `code` que indica éxito
pub const OSRM_OK: &str = "Ok";

/// Response del servicio Trip
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmTripResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub waypoints: Option<Vec<OsrmWaypoint>>,
    #[serde(default)]
    pub trips: Option<Vec<OsrmTrip>>,
}

/// Waypoint devuelto, uno por coordenada enviada
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmWaypoint {
    /// Posición de la coordenada en el orden enviado por el cliente
    pub waypoint_index: usize,
    /// Rango de visita dentro del viaje optimizado
    pub trips_index: usize,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsrmTrip {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

impl OsrmTripResponse {
    pub fn is_ok(&self) -> bool {
        self.code == OSRM_OK
    }
}
