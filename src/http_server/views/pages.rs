use crate::http_server::views::layout;

pub fn home(flashes: &[String]) -> String {
    layout(
        "Home",
        flashes,
        r#"<h1>Fyyur</h1>
<p>Find venues and artists, and book shows.</p>
<p>
    <a href="/venues/create">Post a venue</a> |
    <a href="/artists/create">Post an artist</a> |
    <a href="/shows/create">Post a show</a>
</p>
<form action="/venues/search" method="post">
    <input type="search" name="search_term" placeholder="Find a venue">
    <button type="submit">Search</button>
</form>"#,
    )
}

pub fn not_found() -> String {
    layout(
        "Not Found",
        &[],
        r#"<h1>404</h1><p>Not Found</p><a href="/">Back to home</a>"#,
    )
}

pub fn server_error() -> String {
    layout(
        "Server Error",
        &[],
        r#"<h1>500</h1><p>Internal Server Error</p><a href="/">Back to home</a>"#,
    )
}
