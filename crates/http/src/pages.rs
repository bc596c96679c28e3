//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape`]. Forms are rendered with
//! the submitted values and their field errors so a rejected post can be
//! corrected in place.

use std::fmt::Write as _;

use quotebook_core::{
    FieldErrors, PopularQuotes, Quote, QuoteForm, SourceForm, SourceListing, SourceType,
    MAX_QUOTES_PER_SOURCE,
};

const STYLE: &str = r#"
body { font-family: Georgia, serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
nav a { margin-right: 1rem; }
blockquote { font-size: 1.4rem; border-left: 4px solid #888; margin: 1.5rem 0; padding-left: 1rem; }
.meta { color: #666; }
.errorlist { color: #b00020; list-style: none; padding: 0; margin: 0.25rem 0; }
.field { margin-bottom: 1rem; }
.field label { display: block; font-weight: bold; }
.votes button { margin-right: 0.5rem; }
ol li { margin-bottom: 0.5rem; }
"#;

const VOTE_SCRIPT: &str = r#"
document.querySelectorAll('.votes button').forEach(function (button) {
  button.addEventListener('click', function () {
    var box = button.closest('.votes');
    fetch('/like/' + box.dataset.id + '/', {
      method: 'POST',
      headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
      body: new URLSearchParams({ action: button.dataset.action })
    })
      .then(function (r) { return r.json(); })
      .then(function (data) {
        box.querySelector('.likes').textContent = data.likes;
        box.querySelector('.dislikes').textContent = data.dislikes;
        box.querySelector('.popularity').textContent = data.popularity;
      });
  });
});
"#;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Quotebook</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">Random quote</a><a href="/add-quote/">Add quote</a><a href="/add-source/">Add source</a><a href="/popular/">Popular</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<ul class="errorlist">"#);
    for message in messages {
        let _ = write!(out, "<li>{}</li>", escape(message));
    }
    out.push_str("</ul>");
    out
}

pub fn random_quote_page(quote: Option<&Quote>) -> String {
    let body = match quote {
        None => r#"<p>No quotes yet. <a href="/add-quote/">Add the first one</a>.</p>"#.to_owned(),
        Some(q) => format!(
            r#"<blockquote>{text}</blockquote>
<p class="meta">{source} &middot; {views} views</p>
<div class="votes" data-id="{id}">
<button type="button" data-action="like">Like (<span class="likes">{likes}</span>)</button>
<button type="button" data-action="dislike">Dislike (<span class="dislikes">{dislikes}</span>)</button>
<span>Popularity: <span class="popularity">{popularity}</span>%</span>
</div>
<script>{VOTE_SCRIPT}</script>"#,
            text = escape(&q.text),
            source = escape(&format!("{}: {}", q.source.source_type.label(), q.source.title)),
            views = q.views,
            id = q.id,
            likes = q.likes,
            dislikes = q.dislikes,
            popularity = quotebook_core::popularity(q.likes, q.dislikes),
        ),
    };
    layout("Random quote", &body)
}

pub fn quote_form_page(form: &QuoteForm, errors: &FieldErrors, sources: &[SourceListing]) -> String {
    let mut options = String::from(r#"<option value="">---------</option>"#);
    for listing in sources {
        let id = listing.source.id.to_string();
        let selected = if form.source.trim() == id { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{id}"{selected}>{label} ({count}/{MAX_QUOTES_PER_SOURCE})</option>"#,
            label = escape(&listing.source.to_string()),
            count = listing.quote_count,
        );
    }

    let body = format!(
        r#"{non_field}
<form method="post" action="/add-quote/">
<div class="field"><label for="id_text">Text</label>{text_errors}<textarea id="id_text" name="text" rows="4" cols="60">{text}</textarea></div>
<div class="field"><label for="id_source">Source</label>{source_errors}<select id="id_source" name="source">{options}</select>
<a href="/add-source/">New source</a></div>
<div class="field"><label for="id_weight">Weight</label>{weight_errors}<input id="id_weight" name="weight" type="number" min="1" value="{weight}"></div>
<button type="submit">Save</button>
</form>"#,
        non_field = error_list(errors.non_field()),
        text_errors = error_list(errors.get("text")),
        text = escape(&form.text),
        source_errors = error_list(errors.get("source")),
        weight_errors = error_list(errors.get("weight")),
        weight = escape(&form.weight),
    );
    layout("Add quote", &body)
}

pub fn source_form_page(form: &SourceForm, errors: &FieldErrors) -> String {
    let mut options = String::from(r#"<option value="">---------</option>"#);
    for source_type in SourceType::ALL_VARIANTS {
        let selected =
            if form.source_type.trim().eq_ignore_ascii_case(source_type.as_str()) { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{value}"{selected}>{label}</option>"#,
            value = source_type.as_str(),
            label = source_type.label(),
        );
    }

    let body = format!(
        r#"{non_field}
<form method="post" action="/add-source/">
<div class="field"><label for="id_title">Title</label>{title_errors}<input id="id_title" name="title" type="text" value="{title}"></div>
<div class="field"><label for="id_source_type">Type</label>{type_errors}<select id="id_source_type" name="source_type">{options}</select></div>
<div class="field"><label for="id_year">Year</label>{year_errors}<input id="id_year" name="year" type="number" value="{year}"></div>
<button type="submit">Save</button>
</form>"#,
        non_field = error_list(errors.non_field()),
        title_errors = error_list(errors.get("title")),
        title = escape(&form.title),
        type_errors = error_list(errors.get("source_type")),
        year_errors = error_list(errors.get("year")),
        year = escape(&form.year),
    );
    layout("Add source", &body)
}

fn ranking_section(heading: &str, quotes: &[Quote], score: impl Fn(&Quote) -> String) -> String {
    let mut out = format!("<h2>{}</h2>", escape(heading));
    if quotes.is_empty() {
        out.push_str("<p>Nothing here yet.</p>");
        return out;
    }
    out.push_str("<ol>");
    for quote in quotes {
        let _ = write!(
            out,
            r#"<li>{text} <span class="meta">({source}) &middot; {score}</span></li>"#,
            text = escape(&quote.preview()),
            source = escape(&quote.source.title),
            score = escape(&score(quote)),
        );
    }
    out.push_str("</ol>");
    out
}

pub fn popular_page(popular: &PopularQuotes) -> String {
    let body = [
        ranking_section("Most liked", &popular.by_likes, |q| format!("{} likes", q.likes)),
        ranking_section("Best like ratio", &popular.by_ratio, |q| {
            format!("{}% of {} votes", q.ratio().unwrap_or(0), q.total_votes())
        }),
        ranking_section("Most viewed", &popular.by_views, |q| format!("{} views", q.views)),
    ]
    .concat();
    layout("Popular quotes", &body)
}
