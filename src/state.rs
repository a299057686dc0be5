//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::route_planner_service::RoutePlannerService;
use crate::services::submission_tracker::SubmissionTracker;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub planner: Arc<RoutePlannerService>,
    pub submissions: SubmissionTracker,
}

impl AppState {
    /// Estado con los proveedores HTTP reales
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let planner = RoutePlannerService::from_config(&config)?;
        Ok(Self::with_planner(config, planner))
    }

    pub fn with_planner(config: EnvironmentConfig, planner: RoutePlannerService) -> Self {
        Self {
            config,
            planner: Arc::new(planner),
            submissions: SubmissionTracker::new(),
        }
    }
}
