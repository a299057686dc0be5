//! Routers de la API

pub mod route_plan_routes;

pub use route_plan_routes::create_route_plan_router;
