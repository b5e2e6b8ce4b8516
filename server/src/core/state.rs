//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, la configurazione condivisa e la coda delle email.

use crate::mailer::MailQueue;
use crate::repositories::{
    ChapterRepository, InvitationRepository, MemberRepository, SponsorRepository,
    WorkshopRepository,
};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per membri, ruoli e iscrizioni
    pub member: MemberRepository,

    /// Repository per la directory dei capitoli
    pub chapter: ChapterRepository,

    /// Repository per la directory degli sponsor
    pub sponsor: SponsorRepository,

    /// Repository per i workshop e i loro sponsor
    pub workshop: WorkshopRepository,

    /// Repository per gli inviti e i partecipanti
    pub invitation: InvitationRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Coda verso il worker che spedisce gli inviti
    pub mail_queue: MailQueue,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    /// * `mail_queue` - Coda già collegata ad un worker
    pub fn new(pool: SqlitePool, jwt_secret: String, mail_queue: MailQueue) -> Self {
        Self {
            member: MemberRepository::new(pool.clone()),
            chapter: ChapterRepository::new(pool.clone()),
            sponsor: SponsorRepository::new(pool.clone()),
            workshop: WorkshopRepository::new(pool.clone()),
            invitation: InvitationRepository::new(pool),
            jwt_secret,
            mail_queue,
        }
    }
}
