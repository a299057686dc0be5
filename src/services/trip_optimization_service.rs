//! Servicio de optimización de viajes (OSRM Trip)
//! 
//! Pide al proveedor el orden de visita de las paradas intermedias con el
//! origen y el destino fijos, y reconstruye la secuencia de coordenadas a
//! partir de los índices devueltos.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::EnvironmentConfig;
use crate::dto::osrm_trip_dto::{OsrmTripResponse, OsrmWaypoint};
use crate::models::{Coordinate, OptimizedRoute};

/// Restricciones fijas: sin ida y vuelta, origen y destino anclados
pub const TRIP_CONSTRAINTS: &str = "roundtrip=false&source=first&destination=last";

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("could not optimize route: at least 2 coordinates are required, got {0}")]
    NotEnoughCoordinates(usize),

    #[error("could not optimize route: provider answered '{code}'")]
    Rejected { code: String, message: Option<String> },

    #[error("could not optimize route: waypoints missing from provider response")]
    MissingWaypoints,

    #[error("could not optimize route: {0}")]
    InconsistentWaypoints(String),

    #[error("could not optimize route: unreadable provider response: {0}")]
    InvalidResponse(String),

    #[error("trip provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Proveedor capaz de ordenar un conjunto de coordenadas
#[async_trait]
pub trait TripOptimizer: Send + Sync {
    async fn optimize(&self, coordinates: &[Coordinate]) -> Result<OptimizedRoute, PlanningError>;
}

pub struct OsrmTripService {
    base_url: String,
    profile: String,
    client: Client,
}

impl OsrmTripService {
    pub fn new(config: &EnvironmentConfig) -> Result<Self, PlanningError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(config.http_user_agent.clone())
            .build()?;

        Ok(Self {
            base_url: config.trip_base_url.trim_end_matches('/').to_string(),
            profile: config.trip_profile.clone(),
            client,
        })
    }

    pub fn trip_url(&self, coordinates: &[Coordinate]) -> String {
        format!(
            "{}/trip/v1/{}/{}?{}",
            self.base_url,
            self.profile,
            coordinates_path(coordinates),
            TRIP_CONSTRAINTS
        )
    }
}

#[async_trait]
impl TripOptimizer for OsrmTripService {
    async fn optimize(&self, coordinates: &[Coordinate]) -> Result<OptimizedRoute, PlanningError> {
        if coordinates.len() < 2 {
            return Err(PlanningError::NotEnoughCoordinates(coordinates.len()));
        }

        let url = self.trip_url(coordinates);
        log::info!("🧭 Calling OSRM Trip: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        // OSRM responde 4xx con un cuerpo JSON que trae el `code`
        let status = response.status();
        let response_text = response.text().await?;
        log::debug!("📄 OSRM Trip response ({}): {}", status, response_text);

        let trip: OsrmTripResponse = serde_json::from_str(&response_text).map_err(|e| {
            log::error!("❌ Unreadable OSRM Trip response ({}): {}", status, e);
            PlanningError::InvalidResponse(format!("HTTP {}: {}", status, e))
        })?;

        let route = reconstruct_route(coordinates, &trip).map_err(|e| {
            log::error!("❌ OSRM Trip error: {} ({:?})", e, trip.message);
            e
        })?;

        log::info!("✅ Route optimized, visit order: {:?}", route.visit_order());
        Ok(route)
    }
}

/// Segmento de ruta `lon,lat;lon,lat;...` en el orden enviado
pub fn coordinates_path(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(Coordinate::to_lon_lat)
        .collect::<Vec<_>>()
        .join(";")
}

/// Reconstruir la ruta optimizada.
///
/// Los waypoints se ordenan por `trips_index` (rango de visita) y cada uno
/// se resuelve contra la coordenada enviada en la posición `waypoint_index`.
pub fn reconstruct_route(
    submitted: &[Coordinate],
    trip: &OsrmTripResponse,
) -> Result<OptimizedRoute, PlanningError> {
    if submitted.len() < 2 {
        return Err(PlanningError::NotEnoughCoordinates(submitted.len()));
    }

    if !trip.is_ok() {
        return Err(PlanningError::Rejected {
            code: trip.code.clone(),
            message: trip.message.clone(),
        });
    }

    let waypoints = trip.waypoints.as_ref().ok_or(PlanningError::MissingWaypoints)?;

    if waypoints.len() != submitted.len() {
        return Err(PlanningError::InconsistentWaypoints(format!(
            "{} waypoints returned for {} coordinates",
            waypoints.len(),
            submitted.len()
        )));
    }

    let mut ranked: Vec<&OsrmWaypoint> = waypoints.iter().collect();
    ranked.sort_by_key(|waypoint| waypoint.trips_index);

    let mut seen = vec![false; submitted.len()];
    let mut coordinates = Vec::with_capacity(submitted.len());
    let mut visit_order = Vec::with_capacity(submitted.len());

    for waypoint in ranked {
        let index = waypoint.waypoint_index;
        let coordinate = submitted.get(index).ok_or_else(|| {
            PlanningError::InconsistentWaypoints(format!("waypoint_index {} is out of range", index))
        })?;
        if std::mem::replace(&mut seen[index], true) {
            return Err(PlanningError::InconsistentWaypoints(format!(
                "waypoint_index {} returned twice",
                index
            )));
        }
        coordinates.push(*coordinate);
        visit_order.push(index);
    }

    let last = submitted.len() - 1;
    if visit_order.first() != Some(&0) || visit_order.last() != Some(&last) {
        return Err(PlanningError::InconsistentWaypoints(
            "origin and destination were not kept in place".to_string(),
        ));
    }

    let (distance, duration) = match &trip.trips {
        Some(trips) if !trips.is_empty() => (
            Some(trips.iter().map(|t| t.distance).sum::<f64>()),
            Some(trips.iter().map(|t| t.duration).sum::<f64>()),
        ),
        _ => (None, None),
    };

    Ok(OptimizedRoute::new(coordinates, visit_order, distance, duration))
}
