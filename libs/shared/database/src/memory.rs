use std::sync::Arc;
use tracing::{debug, info, warn};

use shared_models::{EntityKind, RecordId, StoreError};

use crate::latency::{LatencyStrategy, NoLatency, StoreOperation};

/// A record kind that can live in an [`InMemoryTable`].
///
/// `Draft` is everything a caller supplies on create; the table adds the id.
/// `Patch` carries optional fields and is merged onto an existing record.
pub trait Record: Clone + Send + Sync + 'static {
    type Draft: Send;
    type Patch: Send;

    const KIND: EntityKind;

    fn id(&self) -> RecordId;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Process-local collection of one record kind.
///
/// The table owns its rows outright. Every read and write hands back a clone,
/// so the only way to change a stored record is through `update`.
pub struct InMemoryTable<R: Record> {
    rows: Vec<R>,
    latency: Arc<dyn LatencyStrategy>,
}

impl<R: Record> InMemoryTable<R> {
    pub fn new(latency: Arc<dyn LatencyStrategy>) -> Self {
        Self {
            rows: Vec::new(),
            latency,
        }
    }

    /// Table preloaded with `rows`, kept in the given order.
    pub fn with_rows(rows: Vec<R>, latency: Arc<dyn LatencyStrategy>) -> Self {
        debug!("Loaded {} {} records", rows.len(), R::KIND);
        Self { rows, latency }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub async fn get_all(&self) -> Vec<R> {
        self.latency.pause(R::KIND, StoreOperation::GetAll).await;
        self.rows.clone()
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<R, StoreError> {
        self.latency.pause(R::KIND, StoreOperation::GetById).await;
        self.rows
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    /// Fails only once the highest stored id is `RecordId::MAX`.
    pub async fn create(&mut self, draft: R::Draft) -> Result<R, StoreError> {
        self.latency.pause(R::KIND, StoreOperation::Create).await;

        let id = self.next_id().ok_or_else(|| {
            warn!("{} id space exhausted", R::KIND);
            StoreError::IdsExhausted { entity: R::KIND }
        })?;
        let record = R::from_draft(id, draft);
        self.rows.push(record.clone());

        info!("Created {} {}", R::KIND, id);
        Ok(record)
    }

    pub async fn update(&mut self, id: RecordId, patch: R::Patch) -> Result<R, StoreError> {
        self.latency.pause(R::KIND, StoreOperation::Update).await;

        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))?;
        row.apply_patch(patch);

        info!("Updated {} {}", R::KIND, id);
        Ok(row.clone())
    }

    pub async fn delete(&mut self, id: RecordId) -> Result<R, StoreError> {
        self.latency.pause(R::KIND, StoreOperation::Delete).await;

        let index = self
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found(R::KIND, id))?;
        let removed = self.rows.remove(index);

        info!("Deleted {} {}", R::KIND, id);
        Ok(removed)
    }

    /// `max(existing) + 1`, or 1 for an empty table.
    fn next_id(&self) -> Option<RecordId> {
        self.rows.iter().map(R::id).max().unwrap_or(0).checked_add(1)
    }
}

impl<R: Record> Default for InMemoryTable<R> {
    fn default() -> Self {
        Self::new(Arc::new(NoLatency))
    }
}
