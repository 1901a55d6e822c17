use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,

    #[sea_orm(has_many)]
    pub shows: HasMany<super::show::Entity>,

    #[sea_orm(has_many, via = "artist_genre")]
    pub genres: HasMany<super::genre::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
