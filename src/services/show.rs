use std::sync::Arc;

use color_eyre::Result;

use crate::database::Database;

/// One row of the `/shows` listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

pub struct ShowService {
    db: Arc<Database>,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every show joined with its venue and artist.
    ///
    /// Inner-join semantics: a show whose venue or artist is missing is left out.
    pub async fn list_shows(&self) -> Result<Vec<ShowListing>> {
        let shows = self.db.list_shows().await?;
        let venues = self
            .db
            .get_venues_by_ids(shows.iter().map(|s| s.venue_id))
            .await?;
        let artists = self
            .db
            .get_artists_by_ids(shows.iter().map(|s| s.artist_id))
            .await?;

        let listings = shows
            .into_iter()
            .filter_map(|show| {
                let venue = venues.get(&show.venue_id)?;
                let artist = artists.get(&show.artist_id)?;
                Some(ShowListing {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();

        Ok(listings)
    }
}
