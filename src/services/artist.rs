use std::sync::Arc;

use color_eyre::{Result, eyre::eyre};

use crate::database::Database;
use crate::entities;
use crate::schedule::{Buckets, Schedule};
use crate::services::{SearchHit, SearchResults};

/// A show as seen from an artist page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistShow {
    pub start_time: String,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

pub struct ArtistService {
    db: Arc<Database>,
    schedule: Schedule,
}

impl ArtistService {
    pub fn new(db: Arc<Database>, schedule: Schedule) -> Self {
        Self { db, schedule }
    }

    pub async fn list_artists(&self) -> Result<Vec<ArtistSummary>> {
        let artists = self.db.list_artists().await?;
        Ok(artists
            .into_iter()
            .map(|a| ArtistSummary {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    pub async fn search(&self, search_term: &str) -> Result<SearchResults> {
        let artists = self.db.search_artists(search_term).await?;

        let shows = self
            .db
            .get_shows_for_artists(artists.iter().map(|a| a.id))
            .await?;
        let upcoming = self
            .schedule
            .upcoming_counts(shows, |s| s.artist_id, |s| s.start_time.as_str());

        let hits = artists
            .into_iter()
            .map(|artist| SearchHit {
                num_upcoming_shows: upcoming.get(&artist.id).copied().unwrap_or(0),
                id: artist.id,
                name: artist.name,
            })
            .collect();

        log::debug!("Artist search for '{}'", search_term);
        Ok(SearchResults::new(hits))
    }

    /// Build the detail view for one artist, `None` when it doesn't exist.
    pub async fn artist_detail(&self, artist_id: i64) -> Result<Option<ArtistDetail>> {
        let Some(artist) = self.db.get_artist(artist_id).await? else {
            return Ok(None);
        };

        let shows = self.db.get_shows_for_artist(artist_id).await?;
        let venues = self
            .db
            .get_venues_by_ids(shows.iter().map(|s| s.venue_id))
            .await?;

        let mut artist_shows = Vec::with_capacity(shows.len());
        for show in shows {
            let venue = venues.get(&show.venue_id).ok_or_else(|| {
                eyre!(
                    "Show {} references missing venue {}",
                    show.id,
                    show.venue_id
                )
            })?;
            artist_shows.push(ArtistShow {
                start_time: show.start_time,
                venue_id: show.venue_id,
                venue_name: venue.name.clone(),
                venue_image_link: venue.image_link.clone(),
            });
        }

        let buckets = self
            .schedule
            .partition(artist_shows, |s| s.start_time.as_str())?;
        let genres = self.db.get_artist_genre_names(artist_id).await?;

        Ok(Some(ArtistDetail::from_parts(artist, genres, buckets)))
    }
}

impl ArtistDetail {
    fn from_parts(
        artist: entities::artist::Model,
        genres: Vec<String>,
        buckets: Buckets<ArtistShow>,
    ) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            genres,
            past_shows_count: buckets.past.len(),
            upcoming_shows_count: buckets.upcoming.len(),
            past_shows: buckets.past,
            upcoming_shows: buckets.upcoming,
        }
    }
}
