//! Gateway de geocodificación estructurada (Nominatim)
//! 
//! Resuelve una `StructuredAddress` a una única coordenada pidiendo a lo
//! sumo un resultado al proveedor. El proveedor ya ordena por `importance`;
//! aquí no se vuelve a ordenar.

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::EnvironmentConfig;
use crate::dto::nominatim_dto::NominatimSearchResponse;
use crate::models::{Coordinate, StructuredAddress};

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("address not found (structured search): {0}")]
    AddressNotFound(String),

    #[error("low-confidence match for {address}: importance {importance:.3} is below {threshold:.3}")]
    LowConfidence {
        address: String,
        importance: f64,
        threshold: f64,
    },

    #[error("unreadable geocoding response for {address}: {reason}")]
    InvalidResponse { address: String, reason: String },

    #[error("geocoding provider answered HTTP {status} for {address}")]
    ProviderStatus { status: u16, address: String },

    #[error("geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Proveedor capaz de resolver direcciones estructuradas
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn resolve(&self, address: &StructuredAddress) -> Result<Coordinate, GeocodingError>;
}

pub struct NominatimGeocodingService {
    base_url: String,
    country: String,
    min_importance: Option<f64>,
    client: Client,
}

impl NominatimGeocodingService {
    pub fn new(config: &EnvironmentConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(config.http_user_agent.clone())
            .build()?;

        Ok(Self {
            base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            country: config.geocoding_country.clone(),
            min_importance: config.geocoding_min_importance,
            client,
        })
    }

    /// Construir la URL exacta de búsqueda estructurada
    pub fn search_url(&self, address: &StructuredAddress) -> String {
        let mut params: Vec<(&str, String)> = vec![
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
            ("street", address.street_term()),
            ("city", address.city.clone()),
        ];

        if !address.neighborhood.is_empty() {
            params.push(("neighbourhood", address.neighborhood.clone()));
        }
        if !address.state.is_empty() {
            params.push(("state", address.state.clone()));
        }

        let country = if address.country.is_empty() {
            &self.country
        } else {
            &address.country
        };
        if !country.is_empty() {
            params.push(("country", country.clone()));
        }

        if !address.postal_code.is_empty() {
            params.push(("postalcode", address.postal_code.clone()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/search?{}", self.base_url, query)
    }
}

#[async_trait]
impl GeocodingProvider for NominatimGeocodingService {
    async fn resolve(&self, address: &StructuredAddress) -> Result<Coordinate, GeocodingError> {
        let url = self.search_url(address);
        log::info!("🗺️ Calling Nominatim: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        log::debug!("📄 Nominatim response ({}): {}", status, response_text);

        if !status.is_success() {
            log::error!("❌ Geocoding failed with status {} for {}", status, address.describe());
            return Err(GeocodingError::ProviderStatus {
                status: status.as_u16(),
                address: address.describe(),
            });
        }

        let places: NominatimSearchResponse =
            serde_json::from_str(&response_text).map_err(|e| GeocodingError::InvalidResponse {
                address: address.describe(),
                reason: e.to_string(),
            })?;

        let Some(best) = places.first() else {
            log::warn!("⚠️ No match for: {}", address.describe());
            return Err(GeocodingError::AddressNotFound(address.describe()));
        };

        log::info!(
            "✅ Best match: {} (importance: {:?})",
            best.display_name.as_deref().unwrap_or("<unnamed>"),
            best.importance
        );

        if let (Some(threshold), Some(importance)) = (self.min_importance, best.importance) {
            if importance < threshold {
                log::warn!(
                    "⚠️ Rejecting low-confidence match for {}: {} < {}",
                    address.describe(),
                    importance,
                    threshold
                );
                return Err(GeocodingError::LowConfidence {
                    address: address.describe(),
                    importance,
                    threshold,
                });
            }
        }

        Ok(best.coordinate())
    }
}

/// Resolver todas las direcciones en paralelo.
///
/// Mantiene el orden de entrada. El primer error aborta el lote y descarta
/// las peticiones pendientes.
pub async fn resolve_all(
    provider: &dyn GeocodingProvider,
    addresses: &[StructuredAddress],
) -> Result<Vec<Coordinate>, GeocodingError> {
    log::info!("🗺️ Geocoding {} addresses concurrently", addresses.len());
    let coordinates = try_join_all(addresses.iter().map(|address| provider.resolve(address))).await?;
    log::info!("✅ Geocoding completed: {} coordinates", coordinates.len());
    Ok(coordinates)
}
