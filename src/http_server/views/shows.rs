use chrono_tz::Tz;
use color_eyre::Result;

use crate::http_server::views::{escape, layout, opt, show_time};
use crate::services::show::ShowListing;

pub fn list(shows: &[ShowListing], zone: Tz) -> Result<String> {
    let mut body = String::from("<h1>Shows</h1>");
    for show in shows {
        body.push_str(&format!(
            r#"<div class="show">
    <img src="{}" alt="Artist Image">
    <h4>{}</h4>
    <h5><a href="/artists/{}">{}</a></h5>
    <p>playing at</p>
    <h5><a href="/venues/{}">{}</a></h5>
</div>"#,
            opt(&show.artist_image_link),
            show_time(&show.start_time, zone)?,
            show.artist_id,
            escape(&show.artist_name),
            show.venue_id,
            escape(&show.venue_name)
        ));
    }

    Ok(layout("Shows", &[], &body))
}
