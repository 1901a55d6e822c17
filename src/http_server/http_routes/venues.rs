use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use axum_extra::extract::Form;

use crate::http_server::{
    error::{AppError, parse_id},
    forms::{SearchForm, VenueForm},
    state::AppState,
    views,
};

pub async fn venues(State(app_state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let areas = app_state.venue_service().venue_directory().await?;
    Ok(Html(views::venues::directory(&areas)))
}

pub async fn search_venues(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let results = app_state
        .venue_service()
        .search(&form.search_term)
        .await?;
    Ok(Html(views::venues::search(&results, &form.search_term)))
}

pub async fn show_venue(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let venue_id = parse_id(&venue_id, "Venue")?;
    let venue = app_state
        .venue_service()
        .venue_detail(venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {}", venue_id)))?;

    Ok(Html(views::venues::detail(
        &venue,
        app_state.schedule.zone(),
    )?))
}

pub async fn create_venue_form() -> Html<String> {
    Html(views::forms::new_venue())
}

pub async fn create_venue_submission(Form(form): Form<VenueForm>) -> Html<String> {
    log::info!("Venue '{}' submitted", form.name);
    Html(views::pages::home(&[format!(
        "Venue {} was successfully listed!",
        form.name
    )]))
}

/// Accepted for any id; nothing is removed.
pub async fn delete_venue(Path(venue_id): Path<String>) -> StatusCode {
    log::debug!("Delete requested for venue {}", venue_id);
    StatusCode::NO_CONTENT
}

pub async fn edit_venue(Path(venue_id): Path<String>) -> Result<Html<String>, AppError> {
    let venue_id = parse_id(&venue_id, "Venue")?;
    Ok(Html(views::forms::edit_venue(
        venue_id,
        &VenueForm::placeholder(),
    )))
}

pub async fn edit_venue_submission(
    Path(venue_id): Path<String>,
    Form(form): Form<VenueForm>,
) -> Result<Redirect, AppError> {
    let venue_id = parse_id(&venue_id, "Venue")?;
    log::info!("Edit submitted for venue {} ('{}')", venue_id, form.name);
    Ok(Redirect::to(&format!("/venues/{}", venue_id)))
}
