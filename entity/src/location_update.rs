use sea_orm::entity::prelude::*;

/// Append-only position sample owned by a tracking pair. Never mutated
/// after insertion.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "location_update")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tracking_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub recorded_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donator_on_the_way::Entity",
        from = "Column::TrackingId",
        to = "super::donator_on_the_way::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DonatorOnTheWay,
}

impl Related<super::donator_on_the_way::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonatorOnTheWay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
