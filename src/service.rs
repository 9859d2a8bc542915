use async_trait::async_trait;

use crate::model::*;

/// Collaborator/transport failure. The engine never retries; it reports the
/// failure and leaves in-memory state untouched so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError(pub String);

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "service error: {}", self.0)
    }
}

impl std::error::Error for ServiceError {}

/// Reference-data service: master lists the configuration UI offers.
#[async_trait]
pub trait ReferenceData: Send + Sync {
    async fn meal_plans(&self) -> Result<Vec<MealPlan>, ServiceError>;
}

/// Inventory read/write service owning persisted inventories.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Fetch inventory header, per-room detail rows, grid rows and
    /// extra-cost rows for edit-mode hydration.
    async fn fetch(&self, id: InventoryId) -> Result<StoredInventory, ServiceError>;

    /// Create or update an inventory from the flattened payload; returns
    /// the created/updated identifier.
    async fn save(&self, payload: &InventoryPayload) -> Result<InventoryId, ServiceError>;
}

/// Per-room date-availability service.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    async fn fetch(&self, id: InventoryId) -> Result<Vec<CalendarEntry>, ServiceError>;
    async fn update(&self, id: InventoryId, rows: &[CalendarEntry]) -> Result<(), ServiceError>;
}
