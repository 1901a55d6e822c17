use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use migration::MigratorTrait;
use sea_orm::{
    ColumnTrait, ConnectOptions, Database as SeaDatabase, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::entities;

pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Open or create a database at the given path
    pub async fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening database at: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        // Create SQLite connection URL
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(16)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .sqlx_logging(false);

        let database = Self::connect(opt)
            .await
            .wrap_err_with(|| format!("Failed to open database: {}", path.display()))?;

        log::info!("Database ready at: {}", path.display());
        Ok(database)
    }

    /// Connect with the given options and bring the schema up to date
    pub async fn connect(opt: ConnectOptions) -> Result<Self> {
        let conn = SeaDatabase::connect(opt)
            .await
            .wrap_err("Failed to connect to database")?;

        log::debug!("Running database migrations");
        migration::Migrator::up(&conn, None)
            .await
            .wrap_err("Failed to run database migrations")?;

        Ok(Database { conn })
    }

    // ========== Venue Methods ==========

    pub async fn get_venue(&self, id: i64) -> Result<Option<entities::venue::Model>> {
        entities::venue::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to get venue {}", id))
    }

    /// All venues, ordered by city so that grouping keeps a stable order
    pub async fn list_venues(&self) -> Result<Vec<entities::venue::Model>> {
        entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::City)
            .order_by_asc(entities::venue::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err("Failed to list venues")
    }

    /// Venues whose name matches `%search_term%`.
    ///
    /// SQLite's LIKE folds ASCII case, so the match is case-insensitive for
    /// ASCII names. An empty term matches every venue.
    pub async fn search_venues(&self, search_term: &str) -> Result<Vec<entities::venue::Model>> {
        entities::venue::Entity::find()
            .filter(entities::venue::Column::Name.like(like_pattern(search_term)))
            .order_by_asc(entities::venue::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to search venues for '{}'", search_term))
    }

    pub async fn get_venues_by_ids(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, entities::venue::Model>> {
        let venues = entities::venue::Entity::find()
            .filter(entities::venue::Column::Id.is_in(ids))
            .all(&self.conn)
            .await
            .wrap_err("Failed to fetch venues by id")?;

        Ok(venues.into_iter().map(|v| (v.id, v)).collect())
    }

    /// Genre names linked to a venue, in join-row order
    pub async fn get_venue_genre_names(&self, venue_id: i64) -> Result<Vec<String>> {
        let genre_ids = entities::venue_genre::Entity::find()
            .filter(entities::venue_genre::Column::VenueId.eq(venue_id))
            .order_by_asc(entities::venue_genre::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to fetch genres for venue {}", venue_id))?
            .into_iter()
            .map(|vg| vg.genre_id)
            .collect();

        self.resolve_genre_names(genre_ids).await
    }

    // ========== Artist Methods ==========

    pub async fn get_artist(&self, id: i64) -> Result<Option<entities::artist::Model>> {
        entities::artist::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to get artist {}", id))
    }

    pub async fn list_artists(&self) -> Result<Vec<entities::artist::Model>> {
        entities::artist::Entity::find()
            .order_by_asc(entities::artist::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err("Failed to list artists")
    }

    /// Artists whose name matches `%search_term%`, see [`Database::search_venues`]
    pub async fn search_artists(
        &self,
        search_term: &str,
    ) -> Result<Vec<entities::artist::Model>> {
        entities::artist::Entity::find()
            .filter(entities::artist::Column::Name.like(like_pattern(search_term)))
            .order_by_asc(entities::artist::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to search artists for '{}'", search_term))
    }

    pub async fn get_artists_by_ids(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, entities::artist::Model>> {
        let artists = entities::artist::Entity::find()
            .filter(entities::artist::Column::Id.is_in(ids))
            .all(&self.conn)
            .await
            .wrap_err("Failed to fetch artists by id")?;

        Ok(artists.into_iter().map(|a| (a.id, a)).collect())
    }

    /// Genre names linked to an artist, in join-row order
    pub async fn get_artist_genre_names(&self, artist_id: i64) -> Result<Vec<String>> {
        let genre_ids = entities::artist_genre::Entity::find()
            .filter(entities::artist_genre::Column::ArtistId.eq(artist_id))
            .order_by_asc(entities::artist_genre::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to fetch genres for artist {}", artist_id))?
            .into_iter()
            .map(|ag| ag.genre_id)
            .collect();

        self.resolve_genre_names(genre_ids).await
    }

    // ========== Show Methods ==========

    pub async fn list_shows(&self) -> Result<Vec<entities::show::Model>> {
        entities::show::Entity::find()
            .order_by_asc(entities::show::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err("Failed to list shows")
    }

    pub async fn get_shows_for_venue(&self, venue_id: i64) -> Result<Vec<entities::show::Model>> {
        entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(venue_id))
            .order_by_asc(entities::show::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to fetch shows for venue {}", venue_id))
    }

    pub async fn get_shows_for_artist(
        &self,
        artist_id: i64,
    ) -> Result<Vec<entities::show::Model>> {
        entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(artist_id))
            .order_by_asc(entities::show::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err_with(|| format!("Failed to fetch shows for artist {}", artist_id))
    }

    /// Shows at any of the given venues
    pub async fn get_shows_for_venues(
        &self,
        venue_ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<entities::show::Model>> {
        entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.is_in(venue_ids))
            .order_by_asc(entities::show::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err("Failed to fetch shows for venues")
    }

    /// Shows by any of the given artists
    pub async fn get_shows_for_artists(
        &self,
        artist_ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<entities::show::Model>> {
        entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.is_in(artist_ids))
            .order_by_asc(entities::show::Column::Id)
            .all(&self.conn)
            .await
            .wrap_err("Failed to fetch shows for artists")
    }

    // ========== Genre Methods ==========

    /// The join tables carry foreign keys, so a dangling genre id only shows up
    /// when that enforcement is off; it is reported rather than skipped.
    async fn resolve_genre_names(&self, genre_ids: Vec<i64>) -> Result<Vec<String>> {
        if genre_ids.is_empty() {
            return Ok(Vec::new());
        }

        let genres: HashMap<i64, String> = entities::genre::Entity::find()
            .filter(entities::genre::Column::Id.is_in(genre_ids.clone()))
            .all(&self.conn)
            .await
            .wrap_err("Failed to fetch genres")?
            .into_iter()
            .map(|g| (g.id, g.name))
            .collect();

        genre_ids
            .into_iter()
            .map(|id| {
                genres
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| eyre!("Genre {} referenced by a join row does not exist", id))
            })
            .collect()
    }
}

fn like_pattern(search_term: &str) -> String {
    format!("%{}%", search_term)
}
