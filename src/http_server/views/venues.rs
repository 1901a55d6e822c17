use chrono_tz::Tz;
use color_eyre::Result;

use crate::http_server::views::{escape, layout, opt, show_time};
use crate::services::SearchResults;
use crate::services::venue::{VenueArea, VenueDetail, VenueShow};

pub fn directory(areas: &[VenueArea]) -> String {
    let mut body = String::from("<h1>Venues</h1>");

    for area in areas {
        body.push_str(&format!(
            "<h3>{}, {}</h3><ul>",
            opt(&area.city),
            opt(&area.state)
        ));
        for venue in &area.venues {
            body.push_str(&format!(
                r#"<li><a href="/venues/{}">{}</a> <small>{} upcoming shows</small></li>"#,
                venue.id,
                escape(&venue.name),
                venue.num_upcoming_shows
            ));
        }
        body.push_str("</ul>");
    }

    layout("Venues", &[], &body)
}

/// Shared by the venue and artist search pages
pub fn search_results(kind: &str, results: &SearchResults, search_term: &str) -> String {
    let mut body = format!(
        "<h3>Number of search results for \"{}\": {}</h3><ul>",
        escape(search_term),
        results.count
    );

    for hit in &results.data {
        body.push_str(&format!(
            r#"<li><a href="/{}/{}">{}</a> <small>{} upcoming shows</small></li>"#,
            kind,
            hit.id,
            escape(&hit.name),
            hit.num_upcoming_shows
        ));
    }
    body.push_str("</ul>");

    layout("Search", &[], &body)
}

pub fn search(results: &SearchResults, search_term: &str) -> String {
    search_results("venues", results, search_term)
}

fn show_cards(shows: &[VenueShow], zone: Tz) -> Result<String> {
    let mut cards = String::new();
    for show in shows {
        cards.push_str(&format!(
            r#"<div class="show"><img src="{}" alt="Artist Image"><h5><a href="/artists/{}">{}</a></h5><h6>{}</h6></div>"#,
            opt(&show.artist_image_link),
            show.artist_id,
            escape(&show.artist_name),
            show_time(&show.start_time, zone)?
        ));
    }
    Ok(cards)
}

pub fn detail(venue: &VenueDetail, zone: Tz) -> Result<String> {
    let genres: String = venue
        .genres
        .iter()
        .map(|g| format!("<span>{}</span>", escape(g)))
        .collect();

    let seeking = if venue.seeking_talent {
        format!(
            r#"<div class="seeking"><p><strong>Currently seeking talent</strong></p><p>{}</p></div>"#,
            opt(&venue.seeking_description)
        )
    } else {
        r#"<p class="not-seeking">Not currently seeking talent</p>"#.to_string()
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{address}</p>
<p>{city}, {state}</p>
<p>{phone}</p>
<p><a href="{website}">{website}</a></p>
<p><a href="{facebook_link}">{facebook_link}</a></p>
{seeking}
<img src="{image_link}" alt="Venue Image">
<p><a href="/venues/{id}/edit">Edit</a></p>
<section>
    <h2>{upcoming_count} Upcoming Shows</h2>
    {upcoming}
</section>
<section>
    <h2>{past_count} Past Shows</h2>
    {past}
</section>"#,
        name = escape(&venue.name),
        id = venue.id,
        address = opt(&venue.address),
        city = opt(&venue.city),
        state = opt(&venue.state),
        phone = opt(&venue.phone),
        website = opt(&venue.website),
        facebook_link = opt(&venue.facebook_link),
        image_link = opt(&venue.image_link),
        upcoming_count = venue.upcoming_shows_count,
        upcoming = show_cards(&venue.upcoming_shows, zone)?,
        past_count = venue.past_shows_count,
        past = show_cards(&venue.past_shows, zone)?,
    );

    Ok(layout(&venue.name, &[], &body))
}
