//! Loading venues, artists and shows from a TOML seed file.
//!
//! The web forms never write to the database, so seeding is the only way
//! records get in.

use std::collections::HashMap;
use std::path::Path;

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::database::Database;
use crate::entities;

#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub venues: Vec<SeedVenue>,
    #[serde(default)]
    pub artists: Vec<SeedArtist>,
    #[serde(default)]
    pub shows: Vec<SeedShow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedVenue {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedArtist {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// A show refers to its venue and artist by name
#[derive(Debug, Deserialize)]
pub struct SeedShow {
    pub venue: String,
    pub artist: String,
    pub start_time: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
    pub genres_created: usize,
}

impl SeedFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read seed file: {}", path.display()))?;
        Self::parse(&contents)
            .wrap_err_with(|| format!("Failed to parse seed file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Insert everything in `seed` inside a single transaction.
pub async fn seed_database(db: &Database, seed: &SeedFile) -> Result<SeedSummary> {
    let txn = db
        .conn
        .begin()
        .await
        .wrap_err("Failed to start seed transaction")?;

    let summary = match insert_seed(&txn, seed).await {
        Ok(summary) => summary,
        Err(e) => {
            txn.rollback()
                .await
                .wrap_err("Failed to roll back seed transaction")?;
            return Err(e);
        }
    };

    txn.commit()
        .await
        .wrap_err("Failed to commit seed transaction")?;

    log::info!(
        "Seeded {} venues, {} artists, {} shows ({} new genres)",
        summary.venues,
        summary.artists,
        summary.shows,
        summary.genres_created
    );
    Ok(summary)
}

async fn insert_seed(txn: &DatabaseTransaction, seed: &SeedFile) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    let mut genres = GenreCache::default();
    let mut venue_ids: HashMap<&str, i64> = HashMap::new();
    let mut artist_ids: HashMap<&str, i64> = HashMap::new();

    for venue in &seed.venues {
        let model = entities::venue::ActiveModel {
            name: Set(venue.name.clone()),
            city: Set(venue.city.clone()),
            state: Set(venue.state.clone()),
            address: Set(venue.address.clone()),
            phone: Set(venue.phone.clone()),
            website: Set(venue.website.clone()),
            seeking_talent: Set(venue.seeking_talent),
            seeking_description: Set(venue.seeking_description.clone()),
            image_link: Set(venue.image_link.clone()),
            facebook_link: Set(venue.facebook_link.clone()),
            ..entities::venue::ActiveModel::new()
        }
        .insert(txn)
        .await
        .wrap_err_with(|| format!("Failed to insert venue '{}'", venue.name))?;

        for genre in &venue.genres {
            let genre_id = genres.get_or_create(txn, genre).await?;
            entities::venue_genre::ActiveModel {
                venue_id: Set(model.id),
                genre_id: Set(genre_id),
                ..entities::venue_genre::ActiveModel::new()
            }
            .insert(txn)
            .await
            .wrap_err("Failed to link venue genre")?;
        }

        log::debug!("Seeded venue '{}' (ID: {})", model.name, model.id);
        venue_ids.insert(venue.name.as_str(), model.id);
        summary.venues += 1;
    }

    for artist in &seed.artists {
        let model = entities::artist::ActiveModel {
            name: Set(artist.name.clone()),
            city: Set(artist.city.clone()),
            state: Set(artist.state.clone()),
            phone: Set(artist.phone.clone()),
            website: Set(artist.website.clone()),
            image_link: Set(artist.image_link.clone()),
            facebook_link: Set(artist.facebook_link.clone()),
            seeking_venue: Set(artist.seeking_venue),
            seeking_description: Set(artist.seeking_description.clone()),
            ..entities::artist::ActiveModel::new()
        }
        .insert(txn)
        .await
        .wrap_err_with(|| format!("Failed to insert artist '{}'", artist.name))?;

        for genre in &artist.genres {
            let genre_id = genres.get_or_create(txn, genre).await?;
            entities::artist_genre::ActiveModel {
                artist_id: Set(model.id),
                genre_id: Set(genre_id),
                ..entities::artist_genre::ActiveModel::new()
            }
            .insert(txn)
            .await
            .wrap_err("Failed to link artist genre")?;
        }

        log::debug!("Seeded artist '{}' (ID: {})", model.name, model.id);
        artist_ids.insert(artist.name.as_str(), model.id);
        summary.artists += 1;
    }

    for show in &seed.shows {
        let venue_id = match venue_ids.get(show.venue.as_str()) {
            Some(id) => *id,
            None => find_venue_id(txn, &show.venue).await?,
        };
        let artist_id = match artist_ids.get(show.artist.as_str()) {
            Some(id) => *id,
            None => find_artist_id(txn, &show.artist).await?,
        };

        entities::show::ActiveModel {
            venue_id: Set(venue_id),
            artist_id: Set(artist_id),
            start_time: Set(show.start_time.clone()),
            ..entities::show::ActiveModel::new()
        }
        .insert(txn)
        .await
        .wrap_err_with(|| {
            format!(
                "Failed to insert show '{}' at '{}'",
                show.artist, show.venue
            )
        })?;
        summary.shows += 1;
    }

    summary.genres_created = genres.created;
    Ok(summary)
}

async fn find_venue_id<C: ConnectionTrait>(conn: &C, name: &str) -> Result<i64> {
    entities::venue::Entity::find()
        .filter(entities::venue::Column::Name.eq(name))
        .one(conn)
        .await
        .wrap_err_with(|| format!("Failed to look up venue '{}'", name))?
        .map(|v| v.id)
        .ok_or_else(|| eyre!("Show references unknown venue '{}'", name))
}

async fn find_artist_id<C: ConnectionTrait>(conn: &C, name: &str) -> Result<i64> {
    entities::artist::Entity::find()
        .filter(entities::artist::Column::Name.eq(name))
        .one(conn)
        .await
        .wrap_err_with(|| format!("Failed to look up artist '{}'", name))?
        .map(|a| a.id)
        .ok_or_else(|| eyre!("Show references unknown artist '{}'", name))
}

/// Genre ids by name, reusing rows that already exist
#[derive(Default)]
struct GenreCache {
    ids: HashMap<String, i64>,
    created: usize,
}

impl GenreCache {
    async fn get_or_create<C: ConnectionTrait>(&mut self, conn: &C, name: &str) -> Result<i64> {
        if let Some(id) = self.ids.get(name) {
            return Ok(*id);
        }

        let existing = entities::genre::Entity::find()
            .filter(entities::genre::Column::Name.eq(name))
            .one(conn)
            .await
            .wrap_err_with(|| format!("Failed to look up genre '{}'", name))?;

        let id = match existing {
            Some(genre) => genre.id,
            None => {
                let genre = entities::genre::ActiveModel {
                    name: Set(name.to_string()),
                    ..entities::genre::ActiveModel::new()
                }
                .insert(conn)
                .await
                .wrap_err_with(|| format!("Failed to insert genre '{}'", name))?;
                self.created += 1;
                genre.id
            }
        };

        self.ids.insert(name.to_string(), id);
        Ok(id)
    }
}
