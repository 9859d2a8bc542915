use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::engine::InventorySession;
use crate::limits::*;
use crate::model::{InventoryId, InventoryMode};
use crate::notify::NotifyHub;
use crate::service::{InventoryStore, ReferenceData, ServiceError};

pub type SharedSession = Arc<RwLock<InventorySession>>;

/// Manages open configuration sessions. A session is created either blank
/// ("add" flow) or hydrated from a stored inventory ("edit" flow); in both
/// cases the reference meal-plan list is fetched up front.
pub struct SessionManager {
    sessions: DashMap<Ulid, SharedSession>,
    notify: Arc<NotifyHub>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            notify: Arc::new(NotifyHub::new()),
        }
    }

    pub fn notify(&self) -> Arc<NotifyHub> {
        self.notify.clone()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Open a blank session with empty defaults.
    pub async fn open_draft(
        &self,
        mode: InventoryMode,
        reference: &dyn ReferenceData,
    ) -> Result<Ulid, ServiceError> {
        if self.sessions.len() >= MAX_SESSIONS {
            return Err(ServiceError("too many open sessions".into()));
        }
        let meal_plans = reference.meal_plans().await?;
        let session = InventorySession::new(mode, meal_plans, self.notify.clone());
        let id = session.id();
        self.sessions.insert(id, Arc::new(RwLock::new(session)));
        metrics::gauge!(crate::observability::SESSIONS_ACTIVE).set(self.sessions.len() as f64);
        Ok(id)
    }

    /// Open a session hydrated from a stored inventory.
    pub async fn open_for_edit(
        &self,
        inventory_id: InventoryId,
        reference: &dyn ReferenceData,
        store: &dyn InventoryStore,
    ) -> Result<Ulid, ServiceError> {
        if self.sessions.len() >= MAX_SESSIONS {
            return Err(ServiceError("too many open sessions".into()));
        }
        let meal_plans = reference.meal_plans().await?;
        let stored = store.fetch(inventory_id).await?;
        let session = InventorySession::hydrate(stored, meal_plans, self.notify.clone());
        let id = session.id();
        self.sessions.insert(id, Arc::new(RwLock::new(session)));
        metrics::gauge!(crate::observability::SESSIONS_ACTIVE).set(self.sessions.len() as f64);
        Ok(id)
    }

    pub fn get(&self, id: &Ulid) -> Option<SharedSession> {
        self.sessions.get(id).map(|e| e.value().clone())
    }

    /// Discard a session (cancel/navigate away). In-memory only; nothing is
    /// persisted.
    pub fn close(&self, id: &Ulid) {
        if self.sessions.remove(id).is_some() {
            self.notify.remove(id);
            metrics::gauge!(crate::observability::SESSIONS_ACTIVE).set(self.sessions.len() as f64);
            tracing::debug!("session {id} closed");
        }
    }
}
