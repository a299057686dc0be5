//! Controlador de planificación de rutas
//! 
//! Endpoints que usa el cliente web: planificar una ruta completa y
//! previsualizar cómo se interpreta una dirección.

use axum::{extract::State, response::Json};
use serde_json::json;

use crate::dto::route_plan_dto::{ParseAddressRequest, PlanRouteRequest, PlanRouteResponse};
use crate::models::StructuredAddress;
use crate::services::address_parser;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Planificar y optimizar una ruta
pub async fn plan_route(
    State(state): State<AppState>,
    Json(request): Json<PlanRouteRequest>,
) -> AppResult<Json<PlanRouteResponse>> {
    log::info!("🎯 Route plan request received: {} stops", request.stops.len());

    let Some(session_id) = request.session_id.as_deref() else {
        let route = state.planner.plan_route(&request.to_route_request()).await?;
        return Ok(Json(PlanRouteResponse::from_route(&route, None)));
    };

    let ticket = state.submissions.issue(session_id).await;
    let result = state.planner.plan_route(&request.to_route_request()).await;

    let is_current = state.submissions.is_current(&ticket).await;
    state.submissions.complete(&ticket).await;

    if !is_current {
        log::warn!(
            "⏭️ Discarding stale plan for session '{}' (generation {})",
            ticket.session_id,
            ticket.generation
        );
        return Err(AppError::Superseded(format!(
            "a newer route request was submitted for session '{}'",
            ticket.session_id
        )));
    }

    let route = result?;
    Ok(Json(PlanRouteResponse::from_route(&route, Some(ticket.generation))))
}

/// Parsear una dirección sin llamar a ningún proveedor
pub async fn parse_address(
    Json(request): Json<ParseAddressRequest>,
) -> AppResult<Json<StructuredAddress>> {
    let address = address_parser::parse(&request.address)?;
    Ok(Json(address))
}

/// Health check del servicio
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "route-planner",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
