//! Control de envíos concurrentes
//! 
//! Cada planificación de una sesión recibe un número de generación. Cuando
//! termina, el resultado solo es válido si su generación sigue siendo la
//! última emitida para esa sesión. La entrada de la sesión se libera cuando
//! termina su envío más reciente.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ticket emitido para un envío
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub session_id: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionTracker {
    // Contador global: una generación nunca se repite, aunque la sesión se libere
    next_generation: Arc<AtomicU64>,
    latest: Arc<RwLock<HashMap<String, u64>>>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitir una nueva generación para la sesión
    pub async fn issue(&self, session_id: &str) -> SubmissionTicket {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest
            .write()
            .await
            .insert(session_id.to_string(), generation);

        log::debug!("🎫 Session '{}' now at generation {}", session_id, generation);
        SubmissionTicket {
            session_id: session_id.to_string(),
            generation,
        }
    }

    /// ¿Sigue siendo este ticket el último de su sesión?
    pub async fn is_current(&self, ticket: &SubmissionTicket) -> bool {
        let latest = self.latest.read().await;
        latest.get(&ticket.session_id) == Some(&ticket.generation)
    }

    /// Liberar la sesión si este ticket sigue siendo el último emitido
    pub async fn complete(&self, ticket: &SubmissionTicket) {
        let mut latest = self.latest.write().await;
        if latest.get(&ticket.session_id) == Some(&ticket.generation) {
            latest.remove(&ticket.session_id);
        }
    }

    /// Sesiones con un envío en vuelo
    pub async fn active_sessions(&self) -> usize {
        self.latest.read().await.len()
    }
}
