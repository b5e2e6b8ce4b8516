//! Attendee services - Export testuali dei partecipanti

use super::workshop::load_workshop;
use crate::core::{AppError, AppState, Permissions};
use crate::dtos::FormatQuery;
use crate::views;
use crate::views::workshop::workshop_path;
use axum::{
    Extension,
    extract::{Path, Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Export {
    Emails,
    Checklist,
}

/// Nome dell'export e formato testuale richiesto col suffisso `.txt`
fn parse_export(segment: &str) -> Option<(Export, bool)> {
    let (name, txt) = match segment.strip_suffix(".txt") {
        Some(name) => (name, true),
        None => (segment, false),
    };
    match name {
        "emails" => Some((Export::Emails, txt)),
        "checklist" => Some((Export::Checklist, txt)),
        _ => None,
    }
}

/// Testo richiesto da suffisso, `?format=text|txt` o `Accept: text/plain`
fn wants_text(suffix: bool, query: &FormatQuery, headers: &HeaderMap) -> bool {
    suffix
        || matches!(query.format.as_deref(), Some("text" | "txt"))
        || headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(accepts_text_plain)
}

/// `text/plain` tra i media range accettati, escluso `q=0`
fn accepts_text_plain(accept: &str) -> bool {
    accept.split(',').any(|range| {
        let mut parts = range.split(';').map(str::trim);
        let media = parts.next().unwrap_or_default();
        if !media.eq_ignore_ascii_case("text/plain") {
            return false;
        }
        !parts.any(|param| {
            param
                .strip_prefix("q=")
                .and_then(|q| q.parse::<f32>().ok())
                .is_some_and(|q| q <= 0.0)
        })
    })
}

#[instrument(skip(state, permissions, query, headers), fields(member_id = %permissions.member_id, workshop_id = %workshop_id, export = %export))]
pub async fn export_attendees(
    State(state): State<Arc<AppState>>,
    Extension(permissions): Extension<Permissions>,
    Path((workshop_id, export)): Path<(i64, String)>,
    Query(query): Query<FormatQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    debug!("Exporting attendees");
    let (kind, suffix) =
        parse_export(&export).ok_or_else(|| AppError::not_found("Unknown attendee export"))?;

    load_workshop(&state, &permissions, workshop_id).await?;

    if !wants_text(suffix, &query, &headers) {
        debug!("Export requested without text format, redirecting");
        return Ok(Redirect::to(&workshop_path(workshop_id)).into_response());
    }

    let attendees = state.invitation.find_attendees(&workshop_id).await?;
    let body = match kind {
        Export::Emails => views::attendees::emails(&attendees),
        Export::Checklist => views::attendees::checklist(&attendees),
    };

    info!("Exported {} attendees", attendees.len());
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_export() {
        assert_eq!(parse_export("emails.txt"), Some((Export::Emails, true)));
        assert_eq!(parse_export("checklist"), Some((Export::Checklist, false)));
        assert_eq!(parse_export("roster.csv"), None);
    }

    #[test]
    fn test_wants_text() {
        let none = FormatQuery::default();
        let text = FormatQuery {
            format: Some("txt".to_string()),
        };
        let mut accept = HeaderMap::new();
        accept.insert(header::ACCEPT, HeaderValue::from_static("text/plain"));

        assert!(wants_text(true, &none, &HeaderMap::new()));
        assert!(wants_text(false, &text, &HeaderMap::new()));
        assert!(wants_text(false, &none, &accept));
        assert!(!wants_text(false, &none, &HeaderMap::new()));
    }

    #[test]
    fn test_accept_media_ranges() {
        assert!(accepts_text_plain("text/html, text/plain;q=0.5"));
        assert!(accepts_text_plain("Text/Plain; charset=utf-8"));
        assert!(!accepts_text_plain("text/plain;q=0, text/html"));
        assert!(!accepts_text_plain("text/plain; q=0.0"));
        assert!(!accepts_text_plain("text/html, */*;q=0.8"));

        let mut refused = HeaderMap::new();
        refused.insert(header::ACCEPT, HeaderValue::from_static("text/html, text/plain;q=0"));
        assert!(!wants_text(false, &FormatQuery::default(), &refused));
    }
}
