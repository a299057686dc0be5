//! Services module
//! 
//! Este módulo contiene la lógica de negocio del planificador: parseo de
//! direcciones, geocodificación, optimización del viaje y el pipeline que
//! los encadena.

pub mod address_parser;
pub mod geocoding_service;
pub mod route_planner_service;
pub mod submission_tracker;
pub mod trip_optimization_service;

pub use geocoding_service::{GeocodingError, GeocodingProvider, NominatimGeocodingService};
pub use route_planner_service::RoutePlannerService;
pub use submission_tracker::{SubmissionTicket, SubmissionTracker};
pub use trip_optimization_service::{OsrmTripService, PlanningError, TripOptimizer};
