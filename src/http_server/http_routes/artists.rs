use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;

use crate::http_server::{
    error::{AppError, parse_id},
    forms::{ArtistForm, SearchForm},
    state::AppState,
    views,
};

pub async fn artists(State(app_state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let artists = app_state.artist_service().list_artists().await?;
    Ok(Html(views::artists::list(&artists)))
}

pub async fn search_artists(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let results = app_state
        .artist_service()
        .search(&form.search_term)
        .await?;
    Ok(Html(views::artists::search(&results, &form.search_term)))
}

pub async fn show_artist(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let artist_id = parse_id(&artist_id, "Artist")?;
    let artist = app_state
        .artist_service()
        .artist_detail(artist_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {}", artist_id)))?;

    Ok(Html(views::artists::detail(
        &artist,
        app_state.schedule.zone(),
    )?))
}

pub async fn edit_artist(Path(artist_id): Path<String>) -> Result<Html<String>, AppError> {
    let artist_id = parse_id(&artist_id, "Artist")?;
    Ok(Html(views::forms::edit_artist(
        artist_id,
        &ArtistForm::placeholder(),
    )))
}

pub async fn edit_artist_submission(
    Path(artist_id): Path<String>,
    Form(form): Form<ArtistForm>,
) -> Result<Redirect, AppError> {
    let artist_id = parse_id(&artist_id, "Artist")?;
    log::info!("Edit submitted for artist {} ('{}')", artist_id, form.name);
    Ok(Redirect::to(&format!("/artists/{}", artist_id)))
}

pub async fn create_artist_form() -> Html<String> {
    Html(views::forms::new_artist())
}

pub async fn create_artist_submission(Form(form): Form<ArtistForm>) -> Html<String> {
    log::info!("Artist '{}' submitted", form.name);
    Html(views::pages::home(&[format!(
        "Artist {} was successfully listed!",
        form.name
    )]))
}
