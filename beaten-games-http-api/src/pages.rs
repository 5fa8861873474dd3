//! Server-side HTML for the listing, detail and add pages.

use axum::response::Html;
use beaten_games_domain::{
    game::Game,
    nullable::{BeatenOn, Note, ZERO_DATE},
    util::format_date,
};

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Beaten Games</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header><a href="/">Beaten Games</a> <a href="/games/add">Add</a></header>
<main>
{body}
</main>
<script src="/static/app.js"></script>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    ))
}

fn render_beaten_on(beaten_on: &BeatenOn) -> String {
    match beaten_on.as_option() {
        Some(date) if *date == ZERO_DATE => String::new(),
        Some(date) => format_date(date),
        None => "not recorded".to_string(),
    }
}

fn render_note(note: &Note) -> String {
    note.as_option().map(|n| escape_html(n)).unwrap_or_default()
}

pub fn index_page(games: &[Game]) -> Html<String> {
    let rows = games
        .iter()
        .map(|game| {
            format!(
                r#"<tr data-name="{name}"><td><a href="/games/{id}">{name}</a></td><td>{beaten_on}</td><td>{note}</td><td><button class="delete">Delete</button></td></tr>"#,
                id = game.id,
                name = escape_html(&game.name),
                beaten_on = render_beaten_on(&game.beaten_on),
                note = render_note(&game.note),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        r#"<form id="quick-add" action="/games/quick-add" method="post">
<input name="name" list="suggestions" placeholder="Beaten today..." autocomplete="off" required>
<datalist id="suggestions"></datalist>
<button type="submit">Quick add</button>
</form>
<table id="games">
<thead><tr><th>Name</th><th>Beaten on</th><th>Note</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#
    );
    layout("Games", &body)
}

pub fn game_page(game: &Game) -> Html<String> {
    let body = format!(
        r#"<h1>{name}</h1>
<dl>
<dt>Id</dt><dd>{id}</dd>
<dt>Beaten on</dt><dd>{beaten_on}</dd>
<dt>Note</dt><dd>{note}</dd>
</dl>"#,
        id = game.id,
        name = escape_html(&game.name),
        beaten_on = render_beaten_on(&game.beaten_on),
        note = render_note(&game.note),
    );
    layout(&game.name, &body)
}

pub fn add_page() -> Html<String> {
    let body = r#"<h1>Add a game</h1>
<form action="/games/add" method="post">
<label>Name <input name="name" list="suggestions" autocomplete="off" required></label>
<datalist id="suggestions"></datalist>
<label>Beaten on <input name="beaten_on" type="date"></label>
<label>Note <textarea name="note"></textarea></label>
<button type="submit">Add</button>
</form>"#;
    layout("Add a game", body)
}
