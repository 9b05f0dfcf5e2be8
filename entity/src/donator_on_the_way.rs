use sea_orm::entity::prelude::*;

/// One donator's en-route status toward one affected request. Unique per
/// (request, donator) pair; re-marking resets the row instead of
/// duplicating it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donator_on_the_way")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub request_id: i32,
    pub donator_id: i64,
    pub donator_name: String,
    pub donator_email: String,
    pub marked_at: DateTime,
    pub arrived: bool,
    pub is_tracking: bool,
    pub last_location_update: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::affected_request::Entity",
        from = "Column::RequestId",
        to = "super::affected_request::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    AffectedRequest,
    #[sea_orm(has_many = "super::location_update::Entity")]
    LocationUpdate,
}

impl Related<super::affected_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AffectedRequest.def()
    }
}

impl Related<super::location_update::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationUpdate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
