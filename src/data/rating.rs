use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use entity::donation_rating;

pub struct DonationRatingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonationRatingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_history(
        &self,
        donation_history_id: i32,
    ) -> Result<Option<donation_rating::Model>, DbErr> {
        donation_rating::Entity::find()
            .filter(donation_rating::Column::DonationHistoryId.eq(donation_history_id))
            .one(self.db)
            .await
    }

    /// The unique key on `donation_history_id` makes a second insert for
    /// the same entry fail; callers map that to a conflict.
    pub async fn insert(
        &self,
        donation_history_id: i32,
        rating: Option<i32>,
        comment: Option<String>,
        supplies_confirmed: serde_json::Value,
        session_id: String,
        rated_at: NaiveDateTime,
    ) -> Result<donation_rating::Model, DbErr> {
        let record = donation_rating::ActiveModel {
            donation_history_id: Set(donation_history_id),
            rating: Set(rating),
            comment: Set(comment),
            supplies_confirmed: Set(supplies_confirmed),
            session_id: Set(session_id),
            rated_at: Set(rated_at),
            ..Default::default()
        };

        record.insert(self.db).await
    }

    pub async fn list_for_histories(
        &self,
        history_ids: Vec<i32>,
    ) -> Result<Vec<donation_rating::Model>, DbErr> {
        if history_ids.is_empty() {
            return Ok(Vec::new());
        }

        donation_rating::Entity::find()
            .filter(donation_rating::Column::DonationHistoryId.is_in(history_ids))
            .all(self.db)
            .await
    }
}
