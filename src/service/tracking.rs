use chrono::{NaiveDateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    broadcast::ChannelRegistry,
    data::{AffectedRequestRepository, TrackingRepository},
    error::{ConflictError, Error, NotFoundError},
    model::{
        event::{Channel, Event, TrackingStatus, TrackingUpdate},
        Donator,
    },
    util::validate::validate_coordinates,
};

pub struct TrackingService<'a> {
    db: &'a DatabaseConnection,
    channels: &'a ChannelRegistry,
}

impl<'a> TrackingService<'a> {
    pub fn new(db: &'a DatabaseConnection, channels: &'a ChannelRegistry) -> Self {
        Self { db, channels }
    }

    /// Marks a donator as en route to a request.
    ///
    /// # Behavior
    /// - The request row is locked for the duration of the check, so a
    ///   redemption committing in parallel cannot slip in between the
    ///   fulfilled-state check and the tracking write.
    /// - A donator who was already en route (or had arrived) gets their
    ///   pair reset rather than duplicated; the (request, donator) pair
    ///   is unique.
    /// - Subscribers of the locations channel receive a
    ///   `tracking_started` update once the transaction commits.
    pub async fn mark_on_the_way(
        &self,
        request_id: i32,
        donator: &Donator,
    ) -> Result<entity::donator_on_the_way::Model, Error> {
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        let request = AffectedRequestRepository::new(&txn)
            .find_by_id_locked(request_id)
            .await?
            .ok_or(NotFoundError::Request(request_id))?;

        if request.donation_received || !request.is_active {
            return Err(ConflictError::AlreadyFulfilled.into());
        }

        let tracking_repo = TrackingRepository::new(&txn);
        let pair = match tracking_repo.find_pair(request_id, donator.id).await? {
            Some(existing) => tracking_repo.reset(existing, donator, now).await?,
            None => tracking_repo.insert(request_id, donator, now).await?,
        };

        txn.commit().await?;

        tracing::info!(
            "Donator {} is on the way to request {}",
            donator.id,
            request_id
        );
        self.channels.publish(
            Channel::Locations,
            Event::DonatorTrackingUpdate(TrackingUpdate {
                request_id,
                donator_id: donator.id,
                donator_name: pair.donator_name.clone(),
                status: Some(TrackingStatus::TrackingStarted),
                latitude: None,
                longitude: None,
                accuracy: None,
                timestamp: Some(pair.marked_at),
                message: format!("{} is on the way", pair.donator_name),
            }),
        );

        Ok(pair)
    }

    /// Appends a position sample for an actively tracked pair and fans
    /// it out on the locations channel. Samples for a pair that stopped
    /// tracking are rejected.
    pub async fn record_position(
        &self,
        request_id: i32,
        donator_id: i64,
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        recorded_at: Option<NaiveDateTime>,
    ) -> Result<entity::location_update::Model, Error> {
        validate_coordinates(latitude, longitude)?;

        let recorded_at = recorded_at.unwrap_or_else(|| Utc::now().naive_utc());

        let tracking_repo = TrackingRepository::new(self.db);
        let pair = tracking_repo
            .find_tracking_pair(request_id, donator_id)
            .await?
            .ok_or(NotFoundError::NoActiveTracking {
                request_id,
                donator_id,
            })?;

        let donator_name = pair.donator_name.clone();
        let sample = tracking_repo
            .append_position(pair, latitude, longitude, accuracy, recorded_at)
            .await?;

        self.channels.publish(
            Channel::Locations,
            Event::DonatorTrackingUpdate(TrackingUpdate {
                request_id,
                donator_id,
                donator_name,
                status: None,
                latitude: Some(latitude),
                longitude: Some(longitude),
                accuracy: Some(accuracy),
                timestamp: Some(recorded_at),
                message: String::new(),
            }),
        );

        Ok(sample)
    }

    /// Stops live tracking for a pair without touching its arrival
    /// state. The pair stays listed as en route until the QR is scanned
    /// or the donator re-marks.
    pub async fn stop_tracking(
        &self,
        request_id: i32,
        donator_id: i64,
    ) -> Result<entity::donator_on_the_way::Model, Error> {
        let tracking_repo = TrackingRepository::new(self.db);
        let pair = tracking_repo
            .find_pair(request_id, donator_id)
            .await?
            .ok_or(NotFoundError::TrackingPair {
                request_id,
                donator_id,
            })?;

        let stopped = tracking_repo.stop_tracking(pair).await?;

        tracing::info!(
            "Donator {} stopped sharing location for request {}",
            donator_id,
            request_id
        );
        self.channels.publish(
            Channel::Locations,
            Event::DonatorTrackingUpdate(TrackingUpdate {
                request_id,
                donator_id,
                donator_name: stopped.donator_name.clone(),
                status: Some(TrackingStatus::TrackingStopped),
                latitude: None,
                longitude: None,
                accuracy: None,
                timestamp: None,
                message: format!("{} stopped sharing their location", stopped.donator_name),
            }),
        );

        Ok(stopped)
    }
}
