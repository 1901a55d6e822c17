//! Server-rendered HTML pages.
//!
//! Every page is a plain function from view data to a `String`, wrapped in
//! the shared [`layout`]. Dynamic text always goes through [`escape`].

pub mod artists;
pub mod forms;
pub mod pages;
pub mod shows;
pub mod venues;

use chrono_tz::Tz;
use color_eyre::Result;

use crate::formatting::{DateFormat, format_datetime};

/// Date filter keyword for show times on every page
const SHOW_TIME_FORMAT: &str = "full";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped display form of a stored show start time
pub fn show_time(start_time: &str, zone: Tz) -> Result<String> {
    let formatted =
        format_datetime(start_time, DateFormat::from_keyword(SHOW_TIME_FORMAT), zone)?;
    Ok(escape(&formatted))
}

/// Escaped text of an optional column, empty when missing
pub fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

pub fn layout(title: &str, flashes: &[String], body: &str) -> String {
    let mut messages = String::new();
    for flash in flashes {
        messages.push_str(&format!(
            r#"<div class="alert alert-info" role="alert">{}</div>"#,
            escape(flash)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | Fyyur</title>
    <style>
        body {{ font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; margin: 0; color: #333; }}
        nav {{ background: #222; padding: 12px 20px; }}
        nav a {{ color: #ddd; margin-right: 16px; text-decoration: none; }}
        main {{ padding: 20px; }}
        .alert {{ background: #d9edf7; border: 1px solid #bce8f1; padding: 10px; margin-bottom: 10px; }}
        .genres span {{ display: inline-block; background: #eee; padding: 2px 8px; margin-right: 4px; }}
        .show {{ display: inline-block; width: 220px; margin: 0 10px 10px 0; vertical-align: top; }}
        .show img {{ width: 100%; }}
        label {{ display: block; margin-top: 8px; }}
    </style>
</head>
<body>
    <nav>
        <a href="/">Fyyur</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
    </nav>
    <main>
        {messages}
        {body}
    </main>
</body>
</html>
"#,
        title = escape(title),
    )
}
