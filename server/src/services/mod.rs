//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod attendees;
pub mod auth;
pub mod chapter;
pub mod invitation;
pub mod sponsor;
pub mod workshop;

// Re-exports per facilitare l'import
pub use attendees::export_attendees;
pub use auth::{login, login_page, logout};
pub use chapter::{create_chapter, delete_chapter, list_chapter_workshops, list_chapters};
pub use invitation::{invite_audience, send_invites_page, update_invitation};
pub use sponsor::{create_sponsor, list_sponsors};
pub use workshop::{create_workshop, edit_workshop, new_workshop, show_workshop, update_workshop};

use crate::AppState;
use crate::core::Flash;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}

/// Redirect 303 che consegna il flash alla pagina successiva
pub(crate) fn redirect_with_flash(location: &str, flash: Flash) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, flash.set_cookie())]),
        Redirect::to(location),
    )
        .into_response()
}

/// Pagina HTML che consuma il flash appena mostrato
pub(crate) fn page_with_flash(flash: Option<Flash>, page: Html<String>) -> Response {
    match flash {
        Some(_) => (
            AppendHeaders([(header::SET_COOKIE, Flash::clear_cookie())]),
            page,
        )
            .into_response(),
        None => page.into_response(),
    }
}
