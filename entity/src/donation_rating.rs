use sea_orm::entity::prelude::*;

/// Post-donation feedback from the affected person. At most one per
/// donation-history entry, enforced by the unique key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donation_rating")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub donation_history_id: i32,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub supplies_confirmed: Json,
    pub session_id: String,
    pub rated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donation_history::Entity",
        from = "Column::DonationHistoryId",
        to = "super::donation_history::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DonationHistory,
}

impl Related<super::donation_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonationHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
