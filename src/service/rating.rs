use chrono::Utc;
use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};
use serde_json::Value;

use crate::{
    data::{DonationHistoryRepository, DonationRatingRepository},
    error::{ConflictError, Error, NotFoundError, ValidationError},
    model::supply::SuppliesConfirmed,
};

pub struct RatingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RatingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records the affected person's feedback on a donation.
    ///
    /// # Behavior
    /// - At most one rating per donation: a duplicate is rejected whether
    ///   it is caught by the lookup or, under a race, by the unique key
    ///   on the rating table.
    /// - The star rating is optional; when present it must be 1 to 5.
    /// - When the confirmation carries any content, the ledger entry's
    ///   promised-needs snapshot is overwritten with the confirmed view
    ///   in the same transaction.
    pub async fn rate(
        &self,
        donation_history_id: i32,
        session_id: &str,
        rating: Option<i32>,
        comment: Option<String>,
        supplies_confirmed: &Value,
    ) -> Result<entity::donation_rating::Model, Error> {
        if session_id.trim().is_empty() {
            return Err(ValidationError::MissingField("session_id").into());
        }
        if let Some(stars) = rating {
            if !(1..=5).contains(&stars) {
                return Err(ValidationError::RatingOutOfRange(stars).into());
            }
        }
        let confirmed = SuppliesConfirmed::parse(supplies_confirmed)?;

        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        let history_repo = DonationHistoryRepository::new(&txn);
        let entry = history_repo
            .find_by_id(donation_history_id)
            .await?
            .ok_or(NotFoundError::DonationHistory(donation_history_id))?;

        let rating_repo = DonationRatingRepository::new(&txn);
        if rating_repo.find_by_history(entry.id).await?.is_some() {
            return Err(ConflictError::DuplicateRating(entry.id).into());
        }

        let record = rating_repo
            .insert(
                entry.id,
                rating,
                comment,
                confirmed.to_json(),
                session_id.to_string(),
                now,
            )
            .await
            .map_err(|err| match err.sql_err() {
                // A concurrent rating slipped past the lookup.
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Error::from(ConflictError::DuplicateRating(donation_history_id))
                }
                _ => Error::from(err),
            })?;

        if !confirmed.is_empty() {
            history_repo
                .set_fulfilled_view(entry, confirmed.fulfilled_view())
                .await?;
        }

        txn.commit().await?;

        tracing::info!("Recorded rating for donation {}", donation_history_id);

        Ok(record)
    }
}
