//! DTOs para la API de búsqueda de Nominatim
//! 
//! Esquema explícito de `GET /search?format=json`. Nominatim envía `lat` y
//! `lon` como strings; se aceptan también números y se rechazan valores no
//! finitos.

use serde::{Deserialize, Deserializer};

use crate::models::Coordinate;

/// Respuesta de búsqueda: lista ordenada por relevancia
pub type NominatimSearchResponse = Vec<NominatimPlace>;

/// Lugar devuelto por Nominatim
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lon: f64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub importance: Option<f64>,
}

impl NominatimPlace {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => value,
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate '{}': {}", text, e)))?,
    };

    if !value.is_finite() {
        return Err(serde::de::Error::custom("coordinate is not a finite number"));
    }
    Ok(value)
}
