//! Modelos del sistema
//! 
//! Este módulo contiene los tipos de dominio del planificador: direcciones
//! estructuradas, coordenadas, solicitudes de ruta y rutas optimizadas.

pub mod address;
pub mod route;

pub use address::StructuredAddress;
pub use route::{AddressInput, Coordinate, OptimizedRoute, RouteRequest};
