//! Create and edit pages. Create pages render an empty form, edit pages the
//! same fields pre-filled.

use crate::http_server::forms::{ArtistForm, GENRE_CHOICES, ShowForm, US_STATES, VenueForm};
use crate::http_server::views::{escape, layout};

fn text_input(name: &str, label: &str, value: &str, required: bool) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{}"{}>"#,
        escape(value),
        if required { " required" } else { "" }
    )
}

fn state_select(selected: &str) -> String {
    let mut html = String::from(r#"<label for="state">State</label><select id="state" name="state">"#);
    for state in US_STATES {
        html.push_str(&format!(
            r#"<option value="{state}"{}>{state}</option>"#,
            if *state == selected { " selected" } else { "" }
        ));
    }
    html.push_str("</select>");
    html
}

fn genre_select(selected: &[String]) -> String {
    let mut html = String::from(
        r#"<label for="genres">Genres</label><select id="genres" name="genres" multiple>"#,
    );
    for genre in GENRE_CHOICES {
        html.push_str(&format!(
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape(genre),
            if selected.iter().any(|g| g == genre) {
                " selected"
            } else {
                ""
            }
        ));
    }
    html.push_str("</select>");
    html
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<label><input type="checkbox" name="{name}" value="y"{}> {label}</label>"#,
        if checked { " checked" } else { "" }
    )
}

fn venue_fields(form: &VenueForm) -> String {
    [
        text_input("name", "Name", &form.name, true),
        text_input("city", "City", &form.city, false),
        state_select(&form.state),
        text_input("address", "Address", &form.address, false),
        text_input("phone", "Phone", &form.phone, false),
        text_input("image_link", "Image Link", &form.image_link, false),
        genre_select(&form.genres),
        text_input("facebook_link", "Facebook Link", &form.facebook_link, false),
        text_input("website", "Website", &form.website, false),
        checkbox("seeking_talent", "Looking for talent", form.seeking_talent),
        text_input(
            "seeking_description",
            "Seeking Description",
            &form.seeking_description,
            false,
        ),
    ]
    .concat()
}

fn artist_fields(form: &ArtistForm) -> String {
    [
        text_input("name", "Name", &form.name, true),
        text_input("city", "City", &form.city, false),
        state_select(&form.state),
        text_input("phone", "Phone", &form.phone, false),
        text_input("image_link", "Image Link", &form.image_link, false),
        genre_select(&form.genres),
        text_input("facebook_link", "Facebook Link", &form.facebook_link, false),
        text_input("website", "Website", &form.website, false),
        checkbox("seeking_venue", "Looking for venues", form.seeking_venue),
        text_input(
            "seeking_description",
            "Seeking Description",
            &form.seeking_description,
            false,
        ),
    ]
    .concat()
}

fn form_page(title: &str, action: &str, fields: &str, submit: &str) -> String {
    let body = format!(
        r#"<h1>{}</h1>
<form method="post" action="{}">
    {fields}
    <button type="submit">{submit}</button>
</form>"#,
        escape(title),
        escape(action),
    );
    layout(title, &[], &body)
}

pub fn new_venue() -> String {
    form_page(
        "List a new venue",
        "/venues/create",
        &venue_fields(&VenueForm::default()),
        "Create Venue",
    )
}

pub fn edit_venue(venue_id: i64, form: &VenueForm) -> String {
    form_page(
        &format!("Edit venue {}", form.name),
        &format!("/venues/{venue_id}/edit"),
        &venue_fields(form),
        "Edit Venue",
    )
}

pub fn new_artist() -> String {
    form_page(
        "List a new artist",
        "/artists/create",
        &artist_fields(&ArtistForm::default()),
        "Create Artist",
    )
}

pub fn edit_artist(artist_id: i64, form: &ArtistForm) -> String {
    form_page(
        &format!("Edit artist {}", form.name),
        &format!("/artists/{artist_id}/edit"),
        &artist_fields(form),
        "Edit Artist",
    )
}

pub fn new_show() -> String {
    let form = ShowForm::default();
    let fields = [
        text_input("artist_id", "Artist ID", &form.artist_id, false),
        text_input("venue_id", "Venue ID", &form.venue_id, false),
        format!(
            r#"<label for="start_time">Start Time</label><input type="text" id="start_time" name="start_time" placeholder="YYYY-MM-DD HH:MM:SS" value="{}">"#,
            escape(&form.start_time)
        ),
    ]
    .concat();

    form_page("List a new show", "/shows/create", &fields, "Create Show")
}
