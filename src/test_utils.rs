use std::sync::Arc;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectOptions, EntityTrait, PaginatorTrait, Set,
};

use crate::database::Database;
use crate::entities;

pub async fn test_db() -> Arc<Database> {
    // A single connection, otherwise every pooled connection gets its own memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    Arc::new(Database::connect(opt).await.unwrap())
}

pub async fn insert_venue(
    db: &Database,
    name: &str,
    city: &str,
    state: &str,
) -> entities::venue::Model {
    let venue = entities::venue::ActiveModel {
        name: Set(name.into()),
        city: Set(Some(city.into())),
        state: Set(Some(state.into())),
        image_link: Set(Some(format!("https://img.example/{}", name))),
        seeking_talent: Set(false),
        ..entities::venue::ActiveModel::new()
    };
    venue.insert(&db.conn).await.unwrap()
}

pub async fn insert_artist(db: &Database, name: &str) -> entities::artist::Model {
    let artist = entities::artist::ActiveModel {
        name: Set(name.into()),
        city: Set(Some("San Francisco".into())),
        state: Set(Some("CA".into())),
        image_link: Set(Some(format!("https://img.example/{}", name))),
        seeking_venue: Set(false),
        ..entities::artist::ActiveModel::new()
    };
    artist.insert(&db.conn).await.unwrap()
}

pub async fn insert_show(
    db: &Database,
    artist_id: i64,
    venue_id: i64,
    start_time: &str,
) -> entities::show::Model {
    let show = entities::show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(start_time.into()),
        ..entities::show::ActiveModel::new()
    };
    show.insert(&db.conn).await.unwrap()
}

pub async fn insert_genre(db: &Database, name: &str) -> entities::genre::Model {
    let genre = entities::genre::ActiveModel {
        name: Set(name.into()),
        ..entities::genre::ActiveModel::new()
    };
    genre.insert(&db.conn).await.unwrap()
}

pub async fn link_venue_genre(db: &Database, venue_id: i64, genre_id: i64) {
    let link = entities::venue_genre::ActiveModel {
        venue_id: Set(venue_id),
        genre_id: Set(genre_id),
        ..entities::venue_genre::ActiveModel::new()
    };
    link.insert(&db.conn).await.unwrap();
}

pub async fn link_artist_genre(db: &Database, artist_id: i64, genre_id: i64) {
    let link = entities::artist_genre::ActiveModel {
        artist_id: Set(artist_id),
        genre_id: Set(genre_id),
        ..entities::artist_genre::ActiveModel::new()
    };
    link.insert(&db.conn).await.unwrap();
}

pub async fn count_venues(db: &Database) -> u64 {
    entities::venue::Entity::find()
        .count(&db.conn)
        .await
        .unwrap()
}

pub async fn count_artists(db: &Database) -> u64 {
    entities::artist::Entity::find()
        .count(&db.conn)
        .await
        .unwrap()
}

pub async fn count_shows(db: &Database) -> u64 {
    entities::show::Entity::find()
        .count(&db.conn)
        .await
        .unwrap()
}
