use chrono_tz::Tz;
use color_eyre::Result;

use crate::http_server::views::{escape, layout, opt, show_time, venues::search_results};
use crate::services::SearchResults;
use crate::services::artist::{ArtistDetail, ArtistShow, ArtistSummary};

pub fn list(artists: &[ArtistSummary]) -> String {
    let mut body = String::from("<h1>Artists</h1><ul>");
    for artist in artists {
        body.push_str(&format!(
            r#"<li><a href="/artists/{}">{}</a></li>"#,
            artist.id,
            escape(&artist.name)
        ));
    }
    body.push_str("</ul>");

    layout("Artists", &[], &body)
}

pub fn search(results: &SearchResults, search_term: &str) -> String {
    search_results("artists", results, search_term)
}

fn show_cards(shows: &[ArtistShow], zone: Tz) -> Result<String> {
    let mut cards = String::new();
    for show in shows {
        cards.push_str(&format!(
            r#"<div class="show"><img src="{}" alt="Venue Image"><h5><a href="/venues/{}">{}</a></h5><h6>{}</h6></div>"#,
            opt(&show.venue_image_link),
            show.venue_id,
            escape(&show.venue_name),
            show_time(&show.start_time, zone)?
        ));
    }
    Ok(cards)
}

pub fn detail(artist: &ArtistDetail, zone: Tz) -> Result<String> {
    let genres: String = artist
        .genres
        .iter()
        .map(|g| format!("<span>{}</span>", escape(g)))
        .collect();

    let seeking = if artist.seeking_venue {
        format!(
            r#"<div class="seeking"><p><strong>Currently seeking performance venues</strong></p><p>{}</p></div>"#,
            opt(&artist.seeking_description)
        )
    } else {
        r#"<p class="not-seeking">Not currently seeking performance venues</p>"#.to_string()
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{city}, {state}</p>
<p>{phone}</p>
<p><a href="{website}">{website}</a></p>
<p><a href="{facebook_link}">{facebook_link}</a></p>
{seeking}
<img src="{image_link}" alt="Artist Image">
<p><a href="/artists/{id}/edit">Edit</a></p>
<section>
    <h2>{upcoming_count} Upcoming Shows</h2>
    {upcoming}
</section>
<section>
    <h2>{past_count} Past Shows</h2>
    {past}
</section>"#,
        name = escape(&artist.name),
        id = artist.id,
        city = opt(&artist.city),
        state = opt(&artist.state),
        phone = opt(&artist.phone),
        website = opt(&artist.website),
        facebook_link = opt(&artist.facebook_link),
        image_link = opt(&artist.image_link),
        upcoming_count = artist.upcoming_shows_count,
        upcoming = show_cards(&artist.upcoming_shows, zone)?,
        past_count = artist.past_shows_count,
        past = show_cards(&artist.past_shows, zone)?,
    );

    Ok(layout(&artist.name, &[], &body))
}
