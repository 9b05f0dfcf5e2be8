use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000001_affected_request::AffectedRequest;

static UQ_DONATOR_ON_THE_WAY_PAIR: &str = "uq-donator_on_the_way-request_id-donator_id";
static FK_DONATOR_ON_THE_WAY_REQUEST_ID: &str = "fk-donator_on_the_way-request_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DonatorOnTheWay::Table)
                    .if_not_exists()
                    .col(pk_auto(DonatorOnTheWay::Id))
                    .col(integer(DonatorOnTheWay::RequestId))
                    .col(big_integer(DonatorOnTheWay::DonatorId))
                    .col(string(DonatorOnTheWay::DonatorName))
                    .col(string(DonatorOnTheWay::DonatorEmail))
                    .col(timestamp(DonatorOnTheWay::MarkedAt))
                    .col(boolean(DonatorOnTheWay::Arrived))
                    .col(boolean(DonatorOnTheWay::IsTracking))
                    .col(timestamp_null(DonatorOnTheWay::LastLocationUpdate))
                    .to_owned(),
            )
            .await?;

        // One en-route record per (request, donator); re-marking resets it.
        manager
            .create_index(
                Index::create()
                    .name(UQ_DONATOR_ON_THE_WAY_PAIR)
                    .table(DonatorOnTheWay::Table)
                    .col(DonatorOnTheWay::RequestId)
                    .col(DonatorOnTheWay::DonatorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONATOR_ON_THE_WAY_REQUEST_ID)
                    .from_tbl(DonatorOnTheWay::Table)
                    .from_col(DonatorOnTheWay::RequestId)
                    .to_tbl(AffectedRequest::Table)
                    .to_col(AffectedRequest::Id)
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
                    .name(FK_DONATOR_ON_THE_WAY_REQUEST_ID)
                    .table(DonatorOnTheWay::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(UQ_DONATOR_ON_THE_WAY_PAIR)
                    .table(DonatorOnTheWay::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DonatorOnTheWay::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DonatorOnTheWay {
    Table,
    Id,
    RequestId,
    DonatorId,
    DonatorName,
    DonatorEmail,
    MarkedAt,
    Arrived,
    IsTracking,
    LastLocationUpdate,
}
