use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000002_donator_on_the_way::DonatorOnTheWay;

static IDX_LOCATION_UPDATE_TRACKING_RECORDED: &str = "idx-location_update-tracking_id-recorded_at";
static FK_LOCATION_UPDATE_TRACKING_ID: &str = "fk-location_update-tracking_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LocationUpdate::Table)
                    .if_not_exists()
                    .col(pk_auto(LocationUpdate::Id))
                    .col(integer(LocationUpdate::TrackingId))
                    .col(double(LocationUpdate::Latitude))
                    .col(double(LocationUpdate::Longitude))
                    .col(double(LocationUpdate::Accuracy))
                    .col(timestamp(LocationUpdate::RecordedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LOCATION_UPDATE_TRACKING_RECORDED)
                    .table(LocationUpdate::Table)
                    .col(LocationUpdate::TrackingId)
                    .col(LocationUpdate::RecordedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LOCATION_UPDATE_TRACKING_ID)
                    .from_tbl(LocationUpdate::Table)
                    .from_col(LocationUpdate::TrackingId)
                    .to_tbl(DonatorOnTheWay::Table)
                    .to_col(DonatorOnTheWay::Id)
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
                    .name(FK_LOCATION_UPDATE_TRACKING_ID)
                    .table(LocationUpdate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LOCATION_UPDATE_TRACKING_RECORDED)
                    .table(LocationUpdate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LocationUpdate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LocationUpdate {
    Table,
    Id,
    TrackingId,
    Latitude,
    Longitude,
    Accuracy,
    RecordedAt,
}
