//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione, JWT e permessi da organizzatore
//! - Configurazione
//! - Gestione errori
//! - Flash messages e cookie
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod flash;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{
    Claims, Permissions, authentication_middleware, decode_jwt, encode_jwt,
    organiser_middleware, require_chapter_organiser,
};
pub use config::Config;
pub use error::AppError;
pub use flash::Flash;
pub use state::AppState;
