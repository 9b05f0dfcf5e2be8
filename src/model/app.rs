use sea_orm::DatabaseConnection;

use crate::{
    broadcast::ChannelRegistry,
    service::{HistoryService, RatingService, RedemptionService, RequestService, TrackingService},
};

/// Shared handle the embedding transport holds: one connection pool plus
/// the broadcast registry. Cloning is cheap; all clones publish into the
/// same channels.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub channels: ChannelRegistry,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            channels: ChannelRegistry::new(),
        }
    }

    pub fn requests(&self) -> RequestService<'_> {
        RequestService::new(&self.db)
    }

    pub fn tracking(&self) -> TrackingService<'_> {
        TrackingService::new(&self.db, &self.channels)
    }

    pub fn redemption(&self) -> RedemptionService<'_> {
        RedemptionService::new(&self.db, &self.channels)
    }

    pub fn ratings(&self) -> RatingService<'_> {
        RatingService::new(&self.db)
    }

    pub fn history(&self) -> HistoryService<'_> {
        HistoryService::new(&self.db)
    }
}
