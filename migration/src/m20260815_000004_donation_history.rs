use sea_orm_migration::{prelude::*, schema::*};

static IDX_DONATION_HISTORY_QR_CODE: &str = "idx-donation_history-qr_code";
static IDX_DONATION_HISTORY_DONATOR_DONATED: &str = "idx-donation_history-donator_id-donated_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key to affected_request: the ledger entry is a
        // snapshot and must survive request deletion.
        manager
            .create_table(
                Table::create()
                    .table(DonationHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(DonationHistory::Id))
                    .col(big_integer(DonationHistory::DonatorId))
                    .col(string(DonationHistory::DonatorName))
                    .col(string(DonationHistory::DonatorEmail))
                    .col(string(DonationHistory::AffectedFirstName))
                    .col(string(DonationHistory::AffectedLastName))
                    .col(string(DonationHistory::AffectedPhone))
                    .col(double(DonationHistory::Latitude))
                    .col(double(DonationHistory::Longitude))
                    .col(json(DonationHistory::SupplyNeedsFulfilled))
                    .col(string(DonationHistory::QrCode))
                    .col(timestamp(DonationHistory::DonatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DONATION_HISTORY_QR_CODE)
                    .table(DonationHistory::Table)
                    .col(DonationHistory::QrCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DONATION_HISTORY_DONATOR_DONATED)
                    .table(DonationHistory::Table)
                    .col(DonationHistory::DonatorId)
                    .col(DonationHistory::DonatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DONATION_HISTORY_DONATOR_DONATED)
                    .table(DonationHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DONATION_HISTORY_QR_CODE)
                    .table(DonationHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DonationHistory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DonationHistory {
    Table,
    Id,
    DonatorId,
    DonatorName,
    DonatorEmail,
    AffectedFirstName,
    AffectedLastName,
    AffectedPhone,
    Latitude,
    Longitude,
    SupplyNeedsFulfilled,
    QrCode,
    DonatedAt,
}
