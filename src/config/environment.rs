//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno: servidor, logging y
//! las URLs base de los proveedores de geocodificación y optimización.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_TRIP_BASE_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_COUNTRY: &str = "Brazil";
pub const DEFAULT_USER_AGENT: &str = "RoutePlanner/1.0 (route-planner backend)";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub port: u16,
    pub host: String,
    pub log_level: tracing::Level,
    pub cors_origins: Vec<String>,
    pub geocoding_base_url: String,
    pub geocoding_country: String,
    pub geocoding_min_importance: Option<f64>,
    pub trip_base_url: String,
    pub trip_profile: String,
    pub http_user_agent: String,
    pub http_timeout_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            log_level: tracing::Level::INFO,
            cors_origins: Vec::new(),
            geocoding_base_url: DEFAULT_GEOCODING_BASE_URL.to_string(),
            geocoding_country: DEFAULT_COUNTRY.to_string(),
            geocoding_min_importance: None,
            trip_base_url: DEFAULT_TRIP_BASE_URL.to_string(),
            trip_profile: "driving".to_string(),
            http_user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno.
    /// Las claves ausentes toman el valor por defecto.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            port: parsed_var("PORT", defaults.port)?,
            host: string_var("HOST", &defaults.host),
            log_level: parsed_var("LOG_LEVEL", defaults.log_level)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_list(&origins))
                .unwrap_or(defaults.cors_origins),
            geocoding_base_url: trim_base_url(&string_var(
                "GEOCODING_BASE_URL",
                &defaults.geocoding_base_url,
            )),
            geocoding_country: string_var("GEOCODING_COUNTRY", &defaults.geocoding_country),
            geocoding_min_importance: optional_var("GEOCODING_MIN_IMPORTANCE")?,
            trip_base_url: trim_base_url(&string_var("TRIP_BASE_URL", &defaults.trip_base_url)),
            trip_profile: string_var("TRIP_PROFILE", &defaults.trip_profile),
            http_user_agent: string_var("HTTP_USER_AGENT", &defaults.http_user_agent),
            http_timeout_secs: parsed_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
        })
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn string_var(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(key)? {
        Some(value) => Ok(value),
        None => Ok(default),
    }
}

fn optional_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("{} has an invalid value: '{}'", key, raw))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
