use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use entity::affected_request::{ActiveModel, Column, Entity, Model};

use crate::model::request::NewRequest;

pub struct AffectedRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AffectedRequestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        input: &NewRequest,
        supply_needs: serde_json::Value,
        qr_code: String,
        now: NaiveDateTime,
    ) -> Result<Model, DbErr> {
        let record = ActiveModel {
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            phone: Set(input.phone.clone()),
            facebook: Set(input.facebook.clone()),
            email: Set(input.email.clone()),
            notes: Set(input.notes.clone()),
            photo_ref: Set(input.photo_ref.clone()),
            supply_needs: Set(supply_needs),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            accuracy: Set(input.accuracy),
            session_id: Set(input.session_id.clone()),
            qr_code: Set(qr_code),
            is_active: Set(true),
            donation_received: Set(false),
            donated_by: Set(None),
            donated_by_name: Set(None),
            donation_timestamp: Set(None),
            next_request_allowed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            last_seen: Set(now),
            ..Default::default()
        };

        record.insert(self.db).await
    }

    /// Rewrites an existing row with a fresh submission from the same
    /// session. The QR code and creation timestamp survive; everything
    /// the requester re-submitted is replaced and the row becomes
    /// active again.
    pub async fn update_submission(
        &self,
        existing: Model,
        input: &NewRequest,
        supply_needs: serde_json::Value,
        now: NaiveDateTime,
    ) -> Result<Model, DbErr> {
        let mut record: ActiveModel = existing.into();
        record.first_name = Set(input.first_name.clone());
        record.last_name = Set(input.last_name.clone());
        record.phone = Set(input.phone.clone());
        record.facebook = Set(input.facebook.clone());
        record.email = Set(input.email.clone());
        record.notes = Set(input.notes.clone());
        if input.photo_ref.is_some() {
            record.photo_ref = Set(input.photo_ref.clone());
        }
        record.supply_needs = Set(supply_needs);
        record.latitude = Set(input.latitude);
        record.longitude = Set(input.longitude);
        record.accuracy = Set(input.accuracy);
        record.is_active = Set(true);
        record.updated_at = Set(now);
        record.last_seen = Set(now);

        record.update(self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(self.db).await
    }

    /// Same as [`find_by_id`](Self::find_by_id) but takes a row-level
    /// write lock, so concurrent redemptions and tracking updates
    /// serialize on the request row. Only meaningful inside a
    /// transaction.
    pub async fn find_by_id_locked(&self, id: i32) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).lock_exclusive().one(self.db).await
    }

    pub async fn find_active_by_session(&self, session_id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    /// Finds a fulfilled request for this phone number whose cool-down
    /// has not yet elapsed. The comparison is strict: a request whose
    /// `next_request_allowed_at` equals `now` no longer blocks.
    pub async fn find_cooldown_by_phone(
        &self,
        phone: &str,
        now: NaiveDateTime,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Phone.eq(phone))
            .filter(Column::DonationReceived.eq(true))
            .filter(Column::NextRequestAllowedAt.gt(now))
            .one(self.db)
            .await
    }

    /// Looks a request up by its QR token regardless of state, locking
    /// the row. Redemption needs the fulfilled row back to distinguish
    /// an already-used code from an unknown one.
    pub async fn find_by_qr_locked(&self, qr_code: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::QrCode.eq(qr_code))
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Active, unfulfilled requests seen since `cutoff`, freshest first.
    pub async fn list_active_since(&self, cutoff: NaiveDateTime) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::IsActive.eq(true))
            .filter(Column::DonationReceived.eq(false))
            .filter(Column::LastSeen.gte(cutoff))
            .order_by_desc(Column::LastSeen)
            .all(self.db)
            .await
    }

    /// Marks a request fulfilled, but only if it is still active and
    /// unfulfilled. Returns the number of rows changed; zero means a
    /// concurrent redemption won.
    pub async fn mark_fulfilled(
        &self,
        id: i32,
        donator_id: i64,
        donator_name: &str,
        now: NaiveDateTime,
        next_allowed_at: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        let result = Entity::update_many()
            .col_expr(Column::DonationReceived, Expr::value(true))
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::DonatedBy, Expr::value(donator_id))
            .col_expr(Column::DonatedByName, Expr::value(donator_name))
            .col_expr(Column::DonationTimestamp, Expr::value(now))
            .col_expr(Column::NextRequestAllowedAt, Expr::value(next_allowed_at))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::DonationReceived.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = Entity::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected)
    }
}
