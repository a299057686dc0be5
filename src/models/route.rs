//! Modelos de ruta
//! 
//! Tipos transitorios que viven solo durante una ejecución del pipeline:
//! la solicitud del usuario, las coordenadas resueltas y la ruta optimizada.

use serde::{Deserialize, Serialize};

use super::address::StructuredAddress;

/// Par de coordenadas tal como lo devuelve el geocodificador (sin validar límites)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Formato `lon,lat` que exige el optimizador de viajes
    pub fn to_lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

/// Una entrada de la solicitud: texto libre separado por comas o campos explícitos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    Raw(String),
    Structured(StructuredAddress),
}

impl From<&str> for AddressInput {
    fn from(raw: &str) -> Self {
        AddressInput::Raw(raw.to_string())
    }
}

impl From<StructuredAddress> for AddressInput {
    fn from(address: StructuredAddress) -> Self {
        AddressInput::Structured(address)
    }
}

/// Secuencia ordenada de paradas: primera = origen, última = destino
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub stops: Vec<AddressInput>,
}

impl RouteRequest {
    pub fn new(stops: Vec<AddressInput>) -> Self {
        Self { stops }
    }

    pub fn from_raw<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            stops: lines.iter().map(|line| AddressInput::from(line.as_ref())).collect(),
        }
    }
}

/// Resultado inmutable del pipeline.
///
/// `visit_order[i]` es el índice, en el orden enviado, de la coordenada
/// visitada en la posición `i`. El primer y el último elemento son siempre
/// el origen y el destino.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedRoute {
    coordinates: Vec<Coordinate>,
    visit_order: Vec<usize>,
    distance_meters: Option<f64>,
    duration_seconds: Option<f64>,
}

impl OptimizedRoute {
    pub(crate) fn new(
        coordinates: Vec<Coordinate>,
        visit_order: Vec<usize>,
        distance_meters: Option<f64>,
        duration_seconds: Option<f64>,
    ) -> Self {
        Self {
            coordinates,
            visit_order,
            distance_meters,
            duration_seconds,
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    pub fn distance_meters(&self) -> Option<f64> {
        self.distance_meters
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn origin(&self) -> Option<&Coordinate> {
        self.coordinates.first()
    }

    pub fn destination(&self) -> Option<&Coordinate> {
        self.coordinates.last()
    }
}
