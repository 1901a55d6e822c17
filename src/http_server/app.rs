use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    database::Database,
    http_server::{
        http_routes::{artists, pages, shows, venues},
        state::AppState,
    },
    schedule::Schedule,
};

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/venues", get(venues::venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route(
            "/venues/{venue_id}",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/{venue_id}/edit",
            get(venues::edit_venue).post(venues::edit_venue_submission),
        )
        .route("/artists", get(artists::artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route("/artists/{artist_id}", get(artists::show_artist))
        .route(
            "/artists/{artist_id}/edit",
            get(artists::edit_artist).post(artists::edit_artist_submission),
        )
        .route("/shows", get(shows::shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
        .fallback(pages::fallback)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

pub async fn start(port: u16, database: Database, schedule: Schedule) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState {
        db: Arc::new(database),
        schedule,
    });

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", port))?;
    log::info!("Listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::schedule::fixed_schedule;
    use crate::test_utils::{
        count_artists, count_shows, count_venues, insert_artist, insert_show, insert_venue, test_db,
    };

    const NOW: &str = "2024-01-01T00:00:00Z";

    async fn app() -> (Router, Arc<Database>) {
        let db = test_db().await;
        let app_state = Arc::new(AppState {
            db: db.clone(),
            schedule: fixed_schedule(NOW),
        });
        (build_router(app_state), db)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home() {
        let (app, _db) = app().await;
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<h1>Fyyur</h1>"));
    }

    #[tokio::test]
    async fn test_create_venue_flashes_without_persisting() {
        let (app, db) = app().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let response = app
            .oneshot(form_request(
                "/venues/create",
                "name=Test+Venue&city=Oakland&genres=Jazz&genres=Folk",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Venue Test Venue was successfully listed!"));
        assert_eq!(count_venues(&db).await, 1);
    }

    #[tokio::test]
    async fn test_create_artist_and_show_flash() {
        let (app, db) = app().await;

        let response = app
            .clone()
            .oneshot(form_request("/artists/create", "name=Matt+Quevedo"))
            .await
            .unwrap();
        assert!(
            body_text(response)
                .await
                .contains("Artist Matt Quevedo was successfully listed!")
        );

        let response = app
            .oneshot(form_request(
                "/shows/create",
                "artist_id=1&venue_id=1&start_time=2035-04-01+20%3A00%3A00",
            ))
            .await
            .unwrap();
        assert!(
            body_text(response)
                .await
                .contains("Show was successfully listed!")
        );
        assert_eq!(count_artists(&db).await, 0);
        assert_eq!(count_shows(&db).await, 0);
    }

    #[tokio::test]
    async fn test_delete_venue_is_no_content_for_any_id() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let uris: [String; 3] = [
            format!("/venues/{}", venue.id),
            "/venues/9999".into(),
            "/venues/abc".into(),
        ];
        for uri in uris {
            let request = Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
            assert!(body_text(response).await.is_empty());
        }
        assert_eq!(count_venues(&db).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_and_paths_are_404() {
        let (app, _db) = app().await;

        for uri in ["/venues/9999", "/venues/abc", "/artists/9999", "/nowhere"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert!(body_text(response).await.contains("Not Found"));
        }
    }

    #[tokio::test]
    async fn test_venue_detail_page() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, artist.id, venue.id, "2035-04-01T20:00:00.000Z").await;

        let response = app
            .oneshot(get_request(&format!("/venues/{}", venue.id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("The Musical Hop"));
        assert!(body.contains("1 Upcoming Shows"));
        assert!(body.contains("0 Past Shows"));
        assert!(body.contains("Sunday April, 1, 2035 at 1:00PM"));
    }

    #[tokio::test]
    async fn test_dangling_show_is_500() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_show(&db, 4242, venue.id, "2035-04-01T20:00:00.000Z").await;

        let response = app
            .oneshot(get_request(&format!("/venues/{}", venue.id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("Internal Server Error"));
    }

    #[tokio::test]
    async fn test_search_venues() {
        let (app, db) = app().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

        let response = app
            .oneshot(form_request("/venues/search", "search_term=Hop"))
            .await
            .unwrap();

        let body = body_text(response).await;
        assert!(body.contains(": 1</h3>"));
        assert!(body.contains("The Musical Hop"));
        assert!(!body.contains("Park Square"));
    }

    #[tokio::test]
    async fn test_search_venues_empty_term_lists_all() {
        let (app, db) = app().await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        insert_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

        let response = app
            .oneshot(form_request("/venues/search", "search_term="))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(": 3</h3>"));
        assert!(body.contains("The Dueling Pianos Bar"));
    }

    #[tokio::test]
    async fn test_artists_list_and_search() {
        let (app, db) = app().await;
        let guns = insert_artist(&db, "Guns N Petals").await;
        insert_artist(&db, "Matt Quevedo").await;

        let response = app.clone().oneshot(get_request("/artists")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        let link = format!(r#"<a href="/artists/{}">Guns N Petals</a>"#, guns.id);
        assert!(body.contains(&link));
        assert!(body.contains("Matt Quevedo"));

        let response = app
            .oneshot(form_request("/artists/search", "search_term=petals"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(": 1</h3>"));
        assert!(body.contains("Guns N Petals"));
        assert!(!body.contains("Matt Quevedo"));
    }

    #[tokio::test]
    async fn test_artist_detail_page() {
        let (app, db) = app().await;
        let artist = insert_artist(&db, "The Wild Sax Band").await;
        let venue =
            insert_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        insert_show(&db, artist.id, venue.id, "2035-04-01T20:00:00.000Z").await;
        insert_show(&db, artist.id, venue.id, "2035-04-08T20:00:00.000Z").await;
        insert_show(&db, artist.id, venue.id, "2019-06-15T23:00:00.000Z").await;

        let response = app
            .oneshot(get_request(&format!("/artists/{}", artist.id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("The Wild Sax Band"));
        assert!(body.contains("2 Upcoming Shows"));
        assert!(body.contains("1 Past Shows"));
        assert!(body.contains("Park Square Live Music &amp; Coffee"));
    }

    #[tokio::test]
    async fn test_edit_artist_redirects_to_detail() {
        let (app, _db) = app().await;

        let response = app
            .clone()
            .oneshot(get_request("/artists/5/edit"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"value="Guns N Petals""#));
        assert!(body.contains(r#"action="/artists/5/edit""#));

        let response = app
            .oneshot(form_request("/artists/5/edit", "name=Renamed"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/artists/5");
    }

    #[tokio::test]
    async fn test_listings_survive_unparseable_start_time() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, artist.id, venue.id, "TBD").await;

        let response = app.clone().oneshot(get_request("/venues")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let searches = [
            ("/venues/search", "search_term=Hop"),
            ("/artists/search", "search_term=Guns"),
        ];
        for (uri, body) in searches {
            let response = app.clone().oneshot(form_request(uri, body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(body_text(response).await.contains(": 1</h3>"));
        }
    }

    #[tokio::test]
    async fn test_edit_venue_redirects_to_detail() {
        let (app, _db) = app().await;

        let response = app
            .clone()
            .oneshot(get_request("/venues/3/edit"))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("The Musical Hop"));

        let response = app
            .oneshot(form_request("/venues/3/edit", "name=Renamed"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/venues/3");
    }

    #[tokio::test]
    async fn test_shows_listing() {
        let (app, db) = app().await;
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, artist.id, venue.id, "2019-05-21T21:30:00.000Z").await;

        let response = app.oneshot(get_request("/shows")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Guns N Petals"));
        assert!(body.contains("Tuesday May, 21, 2019 at 2:30PM"));
    }
}
