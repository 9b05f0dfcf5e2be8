use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use entity::donator_on_the_way;
use entity::location_update;

use crate::model::Donator;

pub struct TrackingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TrackingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_pair(
        &self,
        request_id: i32,
        donator_id: i64,
    ) -> Result<Option<donator_on_the_way::Model>, DbErr> {
        donator_on_the_way::Entity::find()
            .filter(donator_on_the_way::Column::RequestId.eq(request_id))
            .filter(donator_on_the_way::Column::DonatorId.eq(donator_id))
            .one(self.db)
            .await
    }

    pub async fn find_tracking_pair(
        &self,
        request_id: i32,
        donator_id: i64,
    ) -> Result<Option<donator_on_the_way::Model>, DbErr> {
        donator_on_the_way::Entity::find()
            .filter(donator_on_the_way::Column::RequestId.eq(request_id))
            .filter(donator_on_the_way::Column::DonatorId.eq(donator_id))
            .filter(donator_on_the_way::Column::IsTracking.eq(true))
            .one(self.db)
            .await
    }

    pub async fn insert(
        &self,
        request_id: i32,
        donator: &Donator,
        now: NaiveDateTime,
    ) -> Result<donator_on_the_way::Model, DbErr> {
        let record = donator_on_the_way::ActiveModel {
            request_id: Set(request_id),
            donator_id: Set(donator.id),
            donator_name: Set(donator.display_name()),
            donator_email: Set(donator.email.clone()),
            marked_at: Set(now),
            arrived: Set(false),
            is_tracking: Set(true),
            last_location_update: Set(None),
            ..Default::default()
        };

        record.insert(self.db).await
    }

    /// Re-marking an existing pair resets its state as if the donator
    /// had just set out again.
    pub async fn reset(
        &self,
        existing: donator_on_the_way::Model,
        donator: &Donator,
        now: NaiveDateTime,
    ) -> Result<donator_on_the_way::Model, DbErr> {
        let mut record: donator_on_the_way::ActiveModel = existing.into();
        record.donator_name = Set(donator.display_name());
        record.donator_email = Set(donator.email.clone());
        record.marked_at = Set(now);
        record.arrived = Set(false);
        record.is_tracking = Set(true);
        record.last_location_update = Set(None);

        record.update(self.db).await
    }

    pub async fn stop_tracking(
        &self,
        existing: donator_on_the_way::Model,
    ) -> Result<donator_on_the_way::Model, DbErr> {
        let mut record: donator_on_the_way::ActiveModel = existing.into();
        record.is_tracking = Set(false);

        record.update(self.db).await
    }

    /// Records the arrival without touching the tracking flag; position
    /// samples keep flowing until the donator stops sharing.
    pub async fn mark_arrived(
        &self,
        existing: donator_on_the_way::Model,
    ) -> Result<donator_on_the_way::Model, DbErr> {
        let mut record: donator_on_the_way::ActiveModel = existing.into();
        record.arrived = Set(true);

        record.update(self.db).await
    }

    /// Appends a position sample and bumps the pair's last-update
    /// timestamp in one call.
    pub async fn append_position(
        &self,
        pair: donator_on_the_way::Model,
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        recorded_at: NaiveDateTime,
    ) -> Result<location_update::Model, DbErr> {
        let sample = location_update::ActiveModel {
            tracking_id: Set(pair.id),
            latitude: Set(latitude),
            longitude: Set(longitude),
            accuracy: Set(accuracy),
            recorded_at: Set(recorded_at),
            ..Default::default()
        };
        let inserted = sample.insert(self.db).await?;

        let mut record: donator_on_the_way::ActiveModel = pair.into();
        record.last_location_update = Set(Some(recorded_at));
        record.update(self.db).await?;

        Ok(inserted)
    }

    /// Position trail for one pair, oldest first.
    pub async fn positions(&self, tracking_id: i32) -> Result<Vec<location_update::Model>, DbErr> {
        location_update::Entity::find()
            .filter(location_update::Column::TrackingId.eq(tracking_id))
            .order_by_asc(location_update::Column::RecordedAt)
            .all(self.db)
            .await
    }

    /// Donators still on the way for any of the given requests.
    pub async fn list_en_route(
        &self,
        request_ids: Vec<i32>,
    ) -> Result<Vec<donator_on_the_way::Model>, DbErr> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }

        donator_on_the_way::Entity::find()
            .filter(donator_on_the_way::Column::RequestId.is_in(request_ids))
            .filter(donator_on_the_way::Column::Arrived.eq(false))
            .order_by_asc(donator_on_the_way::Column::MarkedAt)
            .all(self.db)
            .await
    }
}
