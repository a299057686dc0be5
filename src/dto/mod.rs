//! DTOs
//! 
//! Esquemas de los proveedores externos y del API público.

pub mod nominatim_dto;
pub mod osrm_trip_dto;
pub mod route_plan_dto;
