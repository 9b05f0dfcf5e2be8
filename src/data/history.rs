use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use entity::{affected_request, donation_history};

use crate::model::Donator;

pub struct DonationHistoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonationHistoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a redemption as an immutable snapshot of both parties.
    /// The affected person's identity is copied rather than referenced
    /// so the ledger survives request deletion.
    pub async fn insert_snapshot(
        &self,
        request: &affected_request::Model,
        donator: &Donator,
        donated_at: NaiveDateTime,
    ) -> Result<donation_history::Model, DbErr> {
        let record = donation_history::ActiveModel {
            donator_id: Set(donator.id),
            donator_name: Set(donator.display_name()),
            donator_email: Set(donator.email.clone()),
            affected_first_name: Set(request.first_name.clone()),
            affected_last_name: Set(request.last_name.clone()),
            affected_phone: Set(request.phone.clone()),
            latitude: Set(request.latitude),
            longitude: Set(request.longitude),
            supply_needs_fulfilled: Set(request.supply_needs.clone()),
            qr_code: Set(request.qr_code.clone()),
            donated_at: Set(donated_at),
            ..Default::default()
        };

        record.insert(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<donation_history::Model>, DbErr> {
        donation_history::Entity::find_by_id(id).one(self.db).await
    }

    pub async fn list(&self) -> Result<Vec<donation_history::Model>, DbErr> {
        donation_history::Entity::find()
            .order_by_desc(donation_history::Column::DonatedAt)
            .all(self.db)
            .await
    }

    pub async fn list_by_donator(
        &self,
        donator_id: i64,
    ) -> Result<Vec<donation_history::Model>, DbErr> {
        donation_history::Entity::find()
            .filter(donation_history::Column::DonatorId.eq(donator_id))
            .order_by_desc(donation_history::Column::DonatedAt)
            .all(self.db)
            .await
    }

    /// Replaces the promised-needs snapshot with what the affected
    /// person confirmed actually arrived.
    pub async fn set_fulfilled_view(
        &self,
        entry: donation_history::Model,
        fulfilled: serde_json::Value,
    ) -> Result<donation_history::Model, DbErr> {
        let mut record: donation_history::ActiveModel = entry.into();
        record.supply_needs_fulfilled = Set(fulfilled);

        record.update(self.db).await
    }
}
