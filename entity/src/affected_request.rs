use sea_orm::entity::prelude::*;

/// A geolocated relief request from an affected person, anonymous or
/// account-linked. Keyed by an opaque session token so the same requester
/// can update their position in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "affected_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub facebook: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    /// Opaque reference into external file storage.
    pub photo_ref: Option<String>,
    pub supply_needs: Json,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub session_id: String,
    /// Assigned once at creation, never reissued.
    #[sea_orm(unique)]
    pub qr_code: String,
    pub is_active: bool,
    pub donation_received: bool,
    pub donated_by: Option<i64>,
    pub donated_by_name: Option<String>,
    pub donation_timestamp: Option<DateTime>,
    pub next_request_allowed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub last_seen: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donator_on_the_way::Entity")]
    DonatorOnTheWay,
}

impl Related<super::donator_on_the_way::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonatorOnTheWay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
