use sea_orm::entity::prelude::*;

/// Immutable public ledger entry created once per successful QR
/// redemption. Carries snapshots of the affected person's identity rather
/// than a live reference, so the record survives request deletion.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donation_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub donator_id: i64,
    pub donator_name: String,
    pub donator_email: String,
    pub affected_first_name: String,
    pub affected_last_name: String,
    pub affected_phone: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Promised needs at redemption time; overwritten with the confirmed
    /// view once the affected person submits a rating.
    pub supply_needs_fulfilled: Json,
    pub qr_code: String,
    pub donated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::donation_rating::Entity")]
    DonationRating,
}

impl Related<super::donation_rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonationRating.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
