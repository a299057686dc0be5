//! Sistema de manejo de errores
//! 
//! Este módulo define los errores del pipeline de planificación y su
//! conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::services::address_parser::ParseError;
use crate::services::geocoding_service::GeocodingError;
use crate::services::trip_optimization_service::PlanningError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error(transparent)]
    Planning(#[from] PlanningError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Superseded: {0}")]
    Superseded(String),
}

impl AppError {
    /// Etapa del pipeline en la que se produjo el error
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Parse(_) => "parse",
            AppError::Geocoding(_) => "geocoding",
            AppError::Planning(_) => "planning",
            AppError::Validation(_) | AppError::BadRequest(_) => "request",
            AppError::Superseded(_) => "submission",
        }
    }

    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        let stage = self.stage().to_string();
        match self {
            AppError::Parse(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Parse Error".to_string(),
                    message: e.to_string(),
                    details: None,
                    code: "PARSE_ERROR".to_string(),
                    stage,
                },
            ),

            AppError::Geocoding(
                e @ (GeocodingError::AddressNotFound(_) | GeocodingError::LowConfidence { .. }),
            ) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "Geocoding Error".to_string(),
                    message: e.to_string(),
                    details: None,
                    code: "GEOCODING_ERROR".to_string(),
                    stage,
                },
            ),

            AppError::Geocoding(e) => external_api(e.to_string(), stage),

            AppError::Planning(PlanningError::Transport(e)) => external_api(e.to_string(), stage),

            AppError::Planning(e) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    error: "Planning Error".to_string(),
                    message: "Could not optimize the route. Please try again.".to_string(),
                    details: Some(json!({ "reason": e.to_string() })),
                    code: "PLANNING_ERROR".to_string(),
                    stage,
                },
            ),

            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: "VALIDATION_ERROR".to_string(),
                    stage,
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg.clone(),
                    details: None,
                    code: "BAD_REQUEST".to_string(),
                    stage,
                },
            ),

            AppError::Superseded(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Superseded".to_string(),
                    message: msg.clone(),
                    details: None,
                    code: "SUPERSEDED".to_string(),
                    stage,
                },
            ),

        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
    stage: String,
}

fn external_api(reason: String, stage: String) -> (StatusCode, ErrorResponse) {
    (
        StatusCode::BAD_GATEWAY,
        ErrorResponse {
            error: "External API Error".to_string(),
            message: "An error occurred while communicating with external service".to_string(),
            details: Some(json!({ "external_api_error": reason })),
            code: "EXTERNAL_API_ERROR".to_string(),
            stage,
        },
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = self.status_and_body();
        if status.is_server_error() {
            log::error!("❌ {} error: {}", self.stage(), self);
        } else {
            log::warn!("⚠️ {} error: {}", self.stage(), self);
        }
        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Mínimo de entradas de una ruta: origen y destino
pub const MIN_STOPS: u64 = 2;

/// Error de validación para una solicitud con menos de dos entradas
pub fn too_few_stops_error(found: usize) -> AppError {
    let mut error = ValidationError::new("length");
    error.message = Some(Cow::Borrowed("provide at least an origin and a destination"));
    error.add_param(Cow::Borrowed("min"), &MIN_STOPS);
    error.add_param(Cow::Borrowed("value"), &found);

    let mut errors = ValidationErrors::new();
    errors.add("stops", error);
    AppError::Validation(errors)
}
