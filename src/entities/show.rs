use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "show")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    /// Stored as text, parsed by `schedule::parse_start_time`
    pub start_time: String,

    #[sea_orm(belongs_to, from = "artist_id", to = "id")]
    pub artist: Option<super::artist::Entity>,
    #[sea_orm(belongs_to, from = "venue_id", to = "id")]
    pub venue: Option<super::venue::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
