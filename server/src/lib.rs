//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod mailer;
pub mod repositories;
pub mod services;
pub mod views;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .nest("/admin", configure_admin_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configura le routes di autenticazione (login, logout)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Configura le routes dell'area amministrativa: autenticazione + ruolo da organizzatore
fn configure_admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::{authentication_middleware, organiser_middleware};
    use services::*;

    let directory_routes = Router::new()
        .route("/chapters", get(list_chapters).post(create_chapter))
        .route("/chapters/{chapter_id}/delete", post(delete_chapter))
        .route("/chapters/{chapter_id}/workshops", get(list_chapter_workshops))
        .route("/sponsors", get(list_sponsors).post(create_sponsor));

    let workshop_routes = Router::new()
        .route("/workshops", post(create_workshop))
        .route("/workshops/new", get(new_workshop))
        .route(
            "/workshops/{workshop_id}",
            get(show_workshop).patch(update_workshop).post(update_workshop),
        )
        .route("/workshops/{workshop_id}/edit", get(edit_workshop))
        .route("/workshops/{workshop_id}/send_invites", get(send_invites_page))
        .route("/workshops/{workshop_id}/invite/{audience}", post(invite_audience))
        .route(
            "/workshops/{workshop_id}/invitations/{invitation_id}",
            post(update_invitation),
        )
        .route(
            "/workshops/{workshop_id}/attendees/{export}",
            get(export_attendees),
        );

    // l'ultimo layer aggiunto è il primo ad essere eseguito
    directory_routes
        .merge(workshop_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            organiser_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
