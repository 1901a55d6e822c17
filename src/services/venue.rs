use std::collections::HashMap;
use std::sync::Arc;

use color_eyre::{Result, eyre::eyre};

use crate::database::Database;
use crate::entities;
use crate::schedule::Schedule;
use crate::services::{SearchHit, SearchResults};

/// A show as seen from a venue page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueShow {
    pub start_time: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

/// Everything the venue detail page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing a city in the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueArea {
    pub city: Option<String>,
    /// Taken from the first venue listed in this city
    pub state: Option<String>,
    pub venues: Vec<VenueSummary>,
}

pub struct VenueService {
    db: Arc<Database>,
    schedule: Schedule,
}

impl VenueService {
    pub fn new(db: Arc<Database>, schedule: Schedule) -> Self {
        Self { db, schedule }
    }

    /// All venues grouped by city, one area per distinct city
    pub async fn venue_directory(&self) -> Result<Vec<VenueArea>> {
        let venues = self.db.list_venues().await?;
        let upcoming = self.upcoming_counts(&venues).await?;

        let mut areas: Vec<VenueArea> = Vec::new();
        for venue in venues {
            let summary = VenueSummary {
                id: venue.id,
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
                name: venue.name,
            };

            match areas.iter_mut().find(|area| area.city == venue.city) {
                Some(area) => area.venues.push(summary),
                None => areas.push(VenueArea {
                    city: venue.city,
                    state: venue.state,
                    venues: vec![summary],
                }),
            }
        }

        Ok(areas)
    }

    pub async fn search(&self, search_term: &str) -> Result<SearchResults> {
        let venues = self.db.search_venues(search_term).await?;
        let upcoming = self.upcoming_counts(&venues).await?;

        let hits = venues
            .into_iter()
            .map(|venue| SearchHit {
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
                id: venue.id,
                name: venue.name,
            })
            .collect();

        log::debug!("Venue search for '{}'", search_term);
        Ok(SearchResults::new(hits))
    }

    /// Build the detail view for one venue, `None` when it doesn't exist.
    ///
    /// Fails when a show points at a missing artist or has an unparseable start time.
    pub async fn venue_detail(&self, venue_id: i64) -> Result<Option<VenueDetail>> {
        let Some(venue) = self.db.get_venue(venue_id).await? else {
            return Ok(None);
        };

        let shows = self.db.get_shows_for_venue(venue_id).await?;
        let artists = self
            .db
            .get_artists_by_ids(shows.iter().map(|s| s.artist_id))
            .await?;

        let venue_shows = shows
            .into_iter()
            .map(|show| {
                let artist = artists.get(&show.artist_id).ok_or_else(|| {
                    eyre!(
                        "Show {} references missing artist {}",
                        show.id,
                        show.artist_id
                    )
                })?;
                Ok(VenueShow {
                    start_time: show.start_time,
                    artist_id: show.artist_id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let buckets = self
            .schedule
            .partition(venue_shows, |s| s.start_time.as_str())?;
        let genres = self.db.get_venue_genre_names(venue_id).await?;

        Ok(Some(VenueDetail::from_parts(venue, genres, buckets)))
    }

    async fn upcoming_counts(
        &self,
        venues: &[entities::venue::Model],
    ) -> Result<HashMap<i64, usize>> {
        let shows = self
            .db
            .get_shows_for_venues(venues.iter().map(|v| v.id))
            .await?;
        Ok(self
            .schedule
            .upcoming_counts(shows, |s| s.venue_id, |s| s.start_time.as_str()))
    }
}

impl VenueDetail {
    fn from_parts(
        venue: entities::venue::Model,
        genres: Vec<String>,
        buckets: crate::schedule::Buckets<VenueShow>,
    ) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            website: venue.website,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            facebook_link: venue.facebook_link,
            genres,
            past_shows_count: buckets.past.len(),
            upcoming_shows_count: buckets.upcoming.len(),
            past_shows: buckets.past,
            upcoming_shows: buckets.upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::fixed_schedule;
    use crate::test_utils::{
        insert_artist, insert_genre, insert_show, insert_venue, link_venue_genre, test_db,
    };

    const NOW: &str = "2024-01-01T00:00:00Z";

    #[tokio::test]
    async fn test_venue_detail_buckets_shows() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, artist.id, venue.id, "2019-05-21T21:30:00.000Z").await;
        insert_show(&db, artist.id, venue.id, "2035-04-01T20:00:00.000Z").await;
        insert_show(&db, artist.id, venue.id, "2035-04-08T20:00:00.000Z").await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        let detail = service.venue_detail(venue.id).await.unwrap().unwrap();

        assert_eq!(detail.name, "The Musical Hop");
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 2);
        assert_eq!(detail.past_shows.len(), detail.past_shows_count);
        assert_eq!(detail.upcoming_shows.len(), detail.upcoming_shows_count);
        assert_eq!(detail.past_shows[0].start_time, "2019-05-21T21:30:00.000Z");
        assert_eq!(detail.upcoming_shows[0].artist_name, "Guns N Petals");
        assert_eq!(detail.upcoming_shows[0].artist_id, artist.id);
    }

    #[tokio::test]
    async fn test_venue_detail_resolves_genres() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let jazz = insert_genre(&db, "Jazz").await;
        let reggae = insert_genre(&db, "Reggae").await;
        link_venue_genre(&db, venue.id, jazz.id).await;
        link_venue_genre(&db, venue.id, reggae.id).await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        let detail = service.venue_detail(venue.id).await.unwrap().unwrap();

        assert_eq!(detail.genres, vec!["Jazz".to_string(), "Reggae".to_string()]);
        assert!(detail.past_shows.is_empty());
        assert!(detail.upcoming_shows.is_empty());
    }

    #[tokio::test]
    async fn test_venue_detail_not_found() {
        let db = test_db().await;
        let service = VenueService::new(db, fixed_schedule(NOW));
        assert!(service.venue_detail(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_venue_detail_missing_artist_is_error() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_show(&db, 4242, venue.id, "2035-04-01T20:00:00.000Z").await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        let result = service.venue_detail(venue.id).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("missing artist 4242")
        );
    }

    #[tokio::test]
    async fn test_venue_detail_bad_start_time_is_error() {
        let db = test_db().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, artist.id, venue.id, "some time next week").await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        assert!(service.venue_detail(venue.id).await.is_err());
    }

    #[tokio::test]
    async fn test_venue_directory_groups_by_city() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park = insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        let dueling = insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, artist.id, hop.id, "2035-04-01T20:00:00.000Z").await;
        insert_show(&db, artist.id, hop.id, "2019-05-21T21:30:00.000Z").await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        let areas = service.venue_directory().await.unwrap();

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city.as_deref(), Some("New York"));
        assert_eq!(areas[0].state.as_deref(), Some("NY"));
        assert_eq!(areas[0].venues.len(), 1);
        assert_eq!(areas[0].venues[0].id, dueling.id);

        assert_eq!(areas[1].city.as_deref(), Some("San Francisco"));
        let ids: Vec<i64> = areas[1].venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![hop.id, park.id]);
        assert_eq!(areas[1].venues[0].num_upcoming_shows, 1);
        assert_eq!(areas[1].venues[1].num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn test_venue_directory_state_from_first_venue() {
        let db = test_db().await;
        insert_venue(&db, "First", "Portland", "OR").await;
        insert_venue(&db, "Second", "Portland", "ME").await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        let areas = service.venue_directory().await.unwrap();

        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].state.as_deref(), Some("OR"));
        assert_eq!(areas[0].venues.len(), 2);
    }

    #[tokio::test]
    async fn test_search_hop() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "Park Square Live Music", "San Francisco", "CA").await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        let results = service.search("Hop").await.unwrap();

        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].id, hop.id);
        assert_eq!(results.data[0].name, "The Musical Hop");
    }

    #[tokio::test]
    async fn test_search_empty_term_returns_all() {
        let db = test_db().await;
        insert_venue(&db, "A", "San Francisco", "CA").await;
        insert_venue(&db, "B", "San Francisco", "CA").await;
        insert_venue(&db, "C", "New York", "NY").await;

        let service = VenueService::new(db, fixed_schedule(NOW));
        let results = service.search("").await.unwrap();

        assert_eq!(results.count, 3);
        assert_eq!(results.data.len(), 3);
    }

    #[tokio::test]
    async fn test_listings_survive_unparseable_start_time() {
        let db = test_db().await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park = insert_venue(&db, "Park Square Live Music", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, artist.id, hop.id, "TBD").await;
        insert_show(&db, artist.id, hop.id, "2035-04-01T20:00:00.000Z").await;

        let service = VenueService::new(db, fixed_schedule(NOW));

        let areas = service.venue_directory().await.unwrap();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].venues[0].id, hop.id);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 1);

        let results = service.search("Park").await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].id, park.id);
        assert_eq!(results.data[0].num_upcoming_shows, 0);

        let results = service.search("Hop").await.unwrap();
        assert_eq!(results.data[0].num_upcoming_shows, 1);

        // The owner's detail page still reports the bad row
        assert!(service.venue_detail(hop.id).await.is_err());
    }
}
