//! Pipeline dirección → ruta
//! 
//! Parseo → geocodificación en paralelo → optimización del viaje. Cualquier
//! fallo aborta la planificación completa, sin resultados parciales.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::models::{AddressInput, OptimizedRoute, RouteRequest, StructuredAddress};
use crate::services::address_parser;
use crate::services::geocoding_service::{resolve_all, GeocodingProvider, NominatimGeocodingService};
use crate::services::trip_optimization_service::{OsrmTripService, TripOptimizer};
use crate::utils::errors::{too_few_stops_error, AppError, AppResult, MIN_STOPS};

pub struct RoutePlannerService {
    geocoder: Arc<dyn GeocodingProvider>,
    optimizer: Arc<dyn TripOptimizer>,
}

impl RoutePlannerService {
    pub fn new(geocoder: Arc<dyn GeocodingProvider>, optimizer: Arc<dyn TripOptimizer>) -> Self {
        Self { geocoder, optimizer }
    }

    /// Crear el pipeline con los proveedores HTTP configurados
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        let geocoder = NominatimGeocodingService::new(config)?;
        let optimizer = OsrmTripService::new(config)?;
        Ok(Self::new(Arc::new(geocoder), Arc::new(optimizer)))
    }

    /// Planificar una ruta completa
    pub async fn plan_route(&self, request: &RouteRequest) -> AppResult<OptimizedRoute> {
        let addresses = structure_request(request)?;
        log::info!("🚚 Planning route with {} stops", addresses.len());

        let coordinates = resolve_all(self.geocoder.as_ref(), &addresses).await?;
        let route = self.optimizer.optimize(&coordinates).await?;

        log::info!("✅ Route planned: {} stops", route.len());
        Ok(route)
    }
}

/// Validar la solicitud y convertir cada entrada en una dirección estructurada
pub fn structure_request(request: &RouteRequest) -> AppResult<Vec<StructuredAddress>> {
    if (request.stops.len() as u64) < MIN_STOPS {
        return Err(too_few_stops_error(request.stops.len()));
    }

    request
        .stops
        .iter()
        .enumerate()
        .map(|(index, input)| match input {
            AddressInput::Raw(raw) if raw.trim().is_empty() => Err(AppError::BadRequest(format!(
                "entry {} is empty; fill it in before planning the route",
                index + 1
            ))),
            AddressInput::Raw(raw) => Ok(address_parser::parse(raw)?),
            AddressInput::Structured(address) => Ok(address_parser::ensure_complete(address)?),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::services::geocoding_service::GeocodingError;
    use crate::services::trip_optimization_service::{reconstruct_route, PlanningError};
    use crate::dto::osrm_trip_dto::{OsrmTripResponse, OsrmWaypoint};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Geocodificador falso: la latitud es el número de la casa
    struct NumberGeocoder;

    #[async_trait]
    impl GeocodingProvider for NumberGeocoder {
        async fn resolve(&self, address: &StructuredAddress) -> Result<Coordinate, GeocodingError> {
            match address.house_number.parse::<f64>() {
                Ok(n) => Ok(Coordinate::new(n, -n)),
                Err(_) => Err(GeocodingError::AddressNotFound(address.describe())),
            }
        }
    }

    /// Optimizador falso que invierte las paradas intermedias
    #[derive(Default)]
    struct ReversingOptimizer {
        calls: AtomicUsize,
        received: Mutex<Vec<Coordinate>>,
    }

    #[async_trait]
    impl TripOptimizer for ReversingOptimizer {
        async fn optimize(&self, coordinates: &[Coordinate]) -> Result<OptimizedRoute, PlanningError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.received.lock().unwrap() = coordinates.to_vec();

            let last = coordinates.len() - 1;
            let mut order: Vec<usize> = vec![0];
            order.extend((1..last).rev());
            order.push(last);
            let waypoints = (0..coordinates.len())
                .map(|index| OsrmWaypoint {
                    waypoint_index: index,
                    trips_index: order.iter().position(|&o| o == index).unwrap(),
                    name: None,
                    location: None,
                })
                .collect();
            let response = OsrmTripResponse {
                code: "Ok".to_string(),
                message: None,
                waypoints: Some(waypoints),
                trips: None,
            };
            reconstruct_route(coordinates, &response)
        }
    }

    fn planner(optimizer: Arc<ReversingOptimizer>) -> RoutePlannerService {
        RoutePlannerService::new(Arc::new(NumberGeocoder), optimizer)
    }

    #[tokio::test]
    async fn test_plan_route_runs_whole_pipeline() {
        let optimizer = Arc::new(ReversingOptimizer::default());
        let request = RouteRequest::from_raw(&[
            "Rua A, 1, Santos",
            "Rua B, 2, Gonzaga, Santos",
            "Rua C, 3, Santos",
            "Rua D, 4, Santos",
        ]);

        let route = planner(optimizer.clone()).plan_route(&request).await.unwrap();

        let latitudes: Vec<f64> = route.coordinates().iter().map(|c| c.latitude).collect();
        assert_eq!(latitudes, vec![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(optimizer.received.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_geocoding_failure_skips_optimizer() {
        let optimizer = Arc::new(ReversingOptimizer::default());
        let request = RouteRequest::from_raw(&["Rua A, 1, Santos", "Rua B, sem numero, Santos", "Rua C, 3, Santos"]);

        let error = planner(optimizer.clone()).plan_route(&request).await.unwrap_err();
        assert!(matches!(error, AppError::Geocoding(GeocodingError::AddressNotFound(_))));
        assert_eq!(optimizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_parse_failure_aborts_before_geocoding() {
        let optimizer = Arc::new(ReversingOptimizer::default());
        let request = RouteRequest::from_raw(&["Rua A, 1, Santos", "Rua B"]);

        let error = planner(optimizer.clone()).plan_route(&request).await.unwrap_err();
        assert!(matches!(error, AppError::Parse(_)));
        assert_eq!(optimizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_structure_request_rejects_short_and_blank_requests() {
        let error = structure_request(&RouteRequest::from_raw(&["Rua A, 1, Santos"])).unwrap_err();
        match error {
            AppError::Validation(errors) => assert!(errors.field_errors().contains_key("stops")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let error = structure_request(&RouteRequest::from_raw(&["Rua A, 1, Santos", "   "])).unwrap_err();
        assert!(matches!(error, AppError::BadRequest(ref msg) if msg.contains("entry 2")));
    }

    #[test]
    fn test_structure_request_accepts_mixed_inputs() {
        let structured = StructuredAddress {
            street: " Rua B ".to_string(),
            house_number: "2".to_string(),
            city: "Santos".to_string(),
            ..Default::default()
        };
        let request = RouteRequest::new(vec!["Rua A, 1, Santos".into(), structured.into()]);

        let addresses = structure_request(&request).unwrap();
        assert_eq!(addresses[0].street, "Rua A");
        assert_eq!(addresses[1].street, "Rua B");
    }
}
