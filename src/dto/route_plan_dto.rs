//! DTOs del endpoint de planificación de rutas
//! 
//! Cuerpos JSON que intercambia el cliente web (formulario + mapa) con el
//! backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AddressInput, OptimizedRoute, RouteRequest};

/// Request para planificar una ruta
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Identificador de la sesión del cliente; habilita el descarte de
    /// resultados obsoletos cuando hay varios envíos en vuelo
    #[serde(default)]
    pub session_id: Option<String>,
    pub stops: Vec<AddressInput>,
}

impl PlanRouteRequest {
    pub fn to_route_request(&self) -> RouteRequest {
        RouteRequest::new(self.stops.clone())
    }
}

/// Request para parsear una sola dirección
#[derive(Debug, Deserialize)]
pub struct ParseAddressRequest {
    pub address: String,
}

/// Parada de la ruta optimizada, lista para dibujar un marcador
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlannedStop {
    pub position: usize,
    pub original_index: usize,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response de planificación
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanRouteResponse {
    pub plan_id: Uuid,
    pub generation: Option<u64>,
    pub planned_at: DateTime<Utc>,
    pub distance_meters: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub stops: Vec<PlannedStop>,
}

impl PlanRouteResponse {
    pub fn from_route(route: &OptimizedRoute, generation: Option<u64>) -> Self {
        let total = route.len();
        let stops = route
            .coordinates()
            .iter()
            .zip(route.visit_order())
            .enumerate()
            .map(|(position, (coordinate, original_index))| PlannedStop {
                position,
                original_index: *original_index,
                label: stop_label(position, total),
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            })
            .collect();

        Self {
            plan_id: Uuid::new_v4(),
            generation,
            planned_at: Utc::now(),
            distance_meters: route.distance_meters(),
            duration_seconds: route.duration_seconds(),
            stops,
        }
    }
}

/// Etiqueta del marcador: origen, parada N o destino
pub fn stop_label(position: usize, total: usize) -> String {
    if position == 0 {
        "origin".to_string()
    } else if position + 1 == total {
        "destination".to_string()
    } else {
        format!("stop {}", position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    #[test]
    fn test_stop_labels() {
        assert_eq!(stop_label(0, 4), "origin");
        assert_eq!(stop_label(1, 4), "stop 1");
        assert_eq!(stop_label(2, 4), "stop 2");
        assert_eq!(stop_label(3, 4), "destination");
    }

    #[test]
    fn test_request_accepts_raw_and_structured_stops() {
        let request: PlanRouteRequest = serde_json::from_str(
            r#"{"session_id": "tab-1", "stops": ["Rua A, 1, Santos", {"street": "Rua B", "house_number": "2", "city": "Santos"}]}"#,
        )
        .unwrap();
        assert_eq!(request.session_id.as_deref(), Some("tab-1"));
        assert_eq!(request.to_route_request().stops.len(), 2);
    }

    #[test]
    fn test_response_carries_visit_order() {
        let route = OptimizedRoute::new(
            vec![Coordinate::new(1.0, 1.0), Coordinate::new(3.0, 3.0), Coordinate::new(2.0, 2.0)],
            vec![0, 2, 1],
            Some(100.0),
            None,
        );
        let response = PlanRouteResponse::from_route(&route, Some(7));
        assert_eq!(response.generation, Some(7));
        assert_eq!(response.stops[1].original_index, 2);
        assert_eq!(response.stops[1].label, "stop 1");
        assert_eq!(response.stops[2].label, "destination");
        assert_eq!(response.stops[2].latitude, 2.0);
    }
}
