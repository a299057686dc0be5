//! Route planner backend
//! 
//! Convierte una lista de direcciones (origen, paradas, destino) en una ruta
//! optimizada: parseo → geocodificación → optimización del viaje.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use controllers::route_plan_controller;
use middleware::cors::cors_middleware;
use state::AppState;

/// Crear el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(route_plan_controller::health_check))
        .nest("/api/route", routes::create_route_plan_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
