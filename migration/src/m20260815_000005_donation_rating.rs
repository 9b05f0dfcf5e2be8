use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000004_donation_history::DonationHistory;

static IDX_DONATION_RATING_SESSION_ID: &str = "idx-donation_rating-session_id";
static FK_DONATION_RATING_HISTORY_ID: &str = "fk-donation_rating-donation_history_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DonationRating::Table)
                    .if_not_exists()
                    .col(pk_auto(DonationRating::Id))
                    .col(integer_uniq(DonationRating::DonationHistoryId))
                    .col(integer_null(DonationRating::Rating))
                    .col(text_null(DonationRating::Comment))
                    .col(json(DonationRating::SuppliesConfirmed))
                    .col(string(DonationRating::SessionId))
                    .col(timestamp(DonationRating::RatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DONATION_RATING_SESSION_ID)
                    .table(DonationRating::Table)
                    .col(DonationRating::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONATION_RATING_HISTORY_ID)
                    .from_tbl(DonationRating::Table)
                    .from_col(DonationRating::DonationHistoryId)
                    .to_tbl(DonationHistory::Table)
                    .to_col(DonationHistory::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DONATION_RATING_HISTORY_ID)
                    .table(DonationRating::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DONATION_RATING_SESSION_ID)
                    .table(DonationRating::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DonationRating::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum DonationRating {
    Table,
    Id,
    DonationHistoryId,
    Rating,
    Comment,
    SuppliesConfirmed,
    SessionId,
    RatedAt,
}
