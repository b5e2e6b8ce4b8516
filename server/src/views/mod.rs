//! Views module - Rendering HTML e testo delle pagine amministrative
//!
//! Le pagine sono stringhe HTML costruite con `format!`; ogni valore che arriva dal
//! database o dall'utente passa da `escape`.

pub mod attendees;
pub mod auth;
pub mod chapter;
pub mod format;
pub mod sponsor;
pub mod workshop;

use crate::core::flash::Flash;
use axum::http::StatusCode;
use axum::response::Html;

pub use format::{humanize_date, time_range};

/// Escape dei caratteri speciali HTML.
/// L'apostrofo resta invariato: gli attributi usano sempre le virgolette doppie.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Pagina completa: navigazione, eventuale flash e contenuto
pub fn layout(title: &str, flash: Option<Flash>, body: &str) -> Html<String> {
    let flash = flash
        .map(|f| format!(r#"<p id="flash" class="notice">{}</p>"#, f.message()))
        .unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Planner admin</title>
</head>
<body>
<nav>
<a href="/admin/chapters">Chapters</a>
<a href="/admin/sponsors">Sponsors</a>
<a href="/admin/workshops/new">New workshop</a>
<form method="post" action="/auth/logout"><button type="submit">Log out</button></form>
</nav>
{flash}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

/// Lista di messaggi di validazione sopra un form
pub fn error_explanation(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(
        r#"<div id="error_explanation"><h2>{} prevented this from being saved:</h2><ul>{items}</ul></div>"#,
        if errors.len() == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", errors.len())
        }
    )
}

pub fn error_page(status: StatusCode, message: &str, details: Option<&str>) -> Html<String> {
    let details = details
        .map(|d| format!("<p class=\"details\">{}</p>", escape(d)))
        .unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{code}</title></head>
<body>
<h1>{code}</h1>
<p class="error">{message}</p>
{details}
</body>
</html>"#,
        code = status.as_u16(),
        message = escape(message),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keeps_apostrophes() {
        assert_eq!(
            escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry's&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_layout_renders_flash() {
        let Html(page) = layout("Workshop", Some(Flash::WorkshopCreated), "<p>body</p>");
        assert!(page.contains("The workshop has been created"));
        assert!(page.contains("<title>Workshop | Planner admin</title>"));
    }

    #[test]
    fn test_error_explanation() {
        assert_eq!(error_explanation(&[]), "");
        let html = error_explanation(&["Chapter can't be blank".to_string()]);
        assert!(html.contains("1 error prevented"));
        assert!(html.contains("<li>Chapter can't be blank</li>"));
    }
}
