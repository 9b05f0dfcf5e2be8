use sea_orm_migration::{prelude::*, schema::*};

static IDX_AFFECTED_REQUEST_PHONE: &str = "idx-affected_request-phone";
static UQ_AFFECTED_REQUEST_ACTIVE_SESSION: &str = "uq-affected_request-session_id-active";
static IDX_AFFECTED_REQUEST_ACTIVE_LAST_SEEN: &str = "idx-affected_request-is_active-last_seen";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AffectedRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(AffectedRequest::Id))
                    .col(string(AffectedRequest::FirstName))
                    .col(string(AffectedRequest::LastName))
                    .col(string(AffectedRequest::Phone))
                    .col(string_null(AffectedRequest::Facebook))
                    .col(string_null(AffectedRequest::Email))
                    .col(text_null(AffectedRequest::Notes))
                    .col(string_null(AffectedRequest::PhotoRef))
                    .col(json(AffectedRequest::SupplyNeeds))
                    .col(double(AffectedRequest::Latitude))
                    .col(double(AffectedRequest::Longitude))
                    .col(double_null(AffectedRequest::Accuracy))
                    .col(string(AffectedRequest::SessionId))
                    .col(string_uniq(AffectedRequest::QrCode))
                    .col(boolean(AffectedRequest::IsActive))
                    .col(boolean(AffectedRequest::DonationReceived))
                    .col(big_integer_null(AffectedRequest::DonatedBy))
                    .col(string_null(AffectedRequest::DonatedByName))
                    .col(timestamp_null(AffectedRequest::DonationTimestamp))
                    .col(timestamp_null(AffectedRequest::NextRequestAllowedAt))
                    .col(timestamp(AffectedRequest::CreatedAt))
                    .col(timestamp(AffectedRequest::UpdatedAt))
                    .col(timestamp(AffectedRequest::LastSeen))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AFFECTED_REQUEST_PHONE)
                    .table(AffectedRequest::Table)
                    .col(AffectedRequest::Phone)
                    .to_owned(),
            )
            .await?;

        // At most one active request per session token; inactive rows
        // (fulfilled or withdrawn) do not count against it.
        manager
            .create_index(
                Index::create()
                    .name(UQ_AFFECTED_REQUEST_ACTIVE_SESSION)
                    .table(AffectedRequest::Table)
                    .col(AffectedRequest::SessionId)
                    .unique()
                    .and_where(Expr::col(AffectedRequest::IsActive).eq(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AFFECTED_REQUEST_ACTIVE_LAST_SEEN)
                    .table(AffectedRequest::Table)
                    .col(AffectedRequest::IsActive)
                    .col(AffectedRequest::LastSeen)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AFFECTED_REQUEST_ACTIVE_LAST_SEEN)
                    .table(AffectedRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(UQ_AFFECTED_REQUEST_ACTIVE_SESSION)
                    .table(AffectedRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AFFECTED_REQUEST_PHONE)
                    .table(AffectedRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AffectedRequest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AffectedRequest {
    Table,
    Id,
    FirstName,
    LastName,
    Phone,
    Facebook,
    Email,
    Notes,
    PhotoRef,
    SupplyNeeds,
    Latitude,
    Longitude,
    Accuracy,
    SessionId,
    QrCode,
    IsActive,
    DonationReceived,
    DonatedBy,
    DonatedByName,
    DonationTimestamp,
    NextRequestAllowedAt,
    CreatedAt,
    UpdatedAt,
    LastSeen,
}
