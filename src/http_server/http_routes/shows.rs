use std::sync::Arc;

use axum::{extract::State, response::Html};
use axum_extra::extract::Form;

use crate::http_server::{error::AppError, forms::ShowForm, state::AppState, views};

pub async fn shows(State(app_state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let shows = app_state.show_service().list_shows().await?;
    Ok(Html(views::shows::list(&shows, app_state.schedule.zone())?))
}

pub async fn create_show_form() -> Html<String> {
    Html(views::forms::new_show())
}

pub async fn create_show_submission(Form(form): Form<ShowForm>) -> Html<String> {
    log::info!(
        "Show submitted: artist {} at venue {} on {}",
        form.artist_id,
        form.venue_id,
        form.start_time
    );
    Html(views::pages::home(&["Show was successfully listed!".to_string()]))
}
