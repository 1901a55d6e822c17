use std::sync::Arc;

use crate::database::Database;
use crate::schedule::Schedule;
use crate::services::{artist::ArtistService, show::ShowService, venue::VenueService};

/// Built once at startup and shared by every handler.
pub struct AppState {
    pub db: Arc<Database>,
    pub schedule: Schedule,
}

impl AppState {
    pub fn venue_service(&self) -> VenueService {
        VenueService::new(self.db.clone(), self.schedule.clone())
    }

    pub fn artist_service(&self) -> ArtistService {
        ArtistService::new(self.db.clone(), self.schedule.clone())
    }

    pub fn show_service(&self) -> ShowService {
        ShowService::new(self.db.clone())
    }
}
