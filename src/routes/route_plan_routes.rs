//! Rutas del planificador
//! 
//! Este módulo define las rutas relacionadas con la planificación de rutas.

use axum::{routing::post, Router};

use crate::controllers::route_plan_controller;
use crate::state::AppState;

/// Crear el router de planificación
pub fn create_route_plan_router() -> Router<AppState> {
    Router::new()
        .route("/plan", post(route_plan_controller::plan_route))
        .route("/parse", post(route_plan_controller::parse_address))
}
