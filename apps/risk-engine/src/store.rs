//! Record store boundary.
//!
//! The engine never parses raw documents or touches persistence itself;
//! it pulls already-validated records through [`RecordStore`]. Store
//! failures surface as
//! [`EngineError::DataUnavailable`](crate::error::EngineError). The core
//! does not retry; retry policy belongs to whichever adapter implements
//! the port.

use std::sync::RwLock;

use thiserror::Error;

use crate::models::{ClosedTrade, PositionSettings, StockRating};

/// Failure at the record store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store failed to produce records.
    #[error("store backend failure: {0}")]
    Backend(String),

    /// A required record is missing.
    #[error("record not found: {0}")]
    NotFound(String),
}

/// Port through which the caller supplies records to the engine.
///
/// Synchronous by design: the core is pure computation and the only
/// latency or failure it observes comes through this boundary.
pub trait RecordStore: Send + Sync {
    /// Closed trades in entry order, oldest first.
    fn closed_trades(&self) -> Result<Vec<ClosedTrade>, StoreError>;

    /// All recorded stock/sector/market ratings.
    fn ratings(&self) -> Result<Vec<StockRating>, StoreError>;

    /// Current position settings.
    fn position_settings(&self) -> Result<PositionSettings, StoreError>;
}

#[derive(Debug, Default)]
struct Records {
    trades: Vec<ClosedTrade>,
    ratings: Vec<StockRating>,
    settings: Option<PositionSettings>,
}

/// In-memory record store for tests and embedding callers.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Records>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a closed trade (callers keep entry order).
    pub fn save_closed_trade(&self, trade: ClosedTrade) -> Result<(), StoreError> {
        self.write()?.trades.push(trade);
        Ok(())
    }

    /// Append a rating.
    pub fn save_rating(&self, rating: StockRating) -> Result<(), StoreError> {
        self.write()?.ratings.push(rating);
        Ok(())
    }

    /// Remove a rating by id.
    pub fn delete_rating(&self, id: &str) -> Result<(), StoreError> {
        self.write()?.ratings.retain(|r| r.id != id);
        Ok(())
    }

    /// Replace the position settings.
    pub fn save_position_settings(&self, settings: PositionSettings) -> Result<(), StoreError> {
        self.write()?.settings = Some(settings);
        Ok(())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Records>, StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::Backend("record lock poisoned".to_string()))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Records>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::Backend("record lock poisoned".to_string()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn closed_trades(&self) -> Result<Vec<ClosedTrade>, StoreError> {
        Ok(self.read()?.trades.clone())
    }

    fn ratings(&self) -> Result<Vec<StockRating>, StoreError> {
        Ok(self.read()?.ratings.clone())
    }

    fn position_settings(&self) -> Result<PositionSettings, StoreError> {
        self.read()?
            .settings
            .clone()
            .ok_or_else(|| StoreError::NotFound("position settings".to_string()))
    }
}
